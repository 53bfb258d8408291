pub mod http;
pub mod imaging;
pub mod roboflow;
pub mod storage;
