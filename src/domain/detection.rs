use serde::{Deserialize, Serialize};

/// Una detección devuelta por el servicio remoto.
/// La caja viene en formato centro + tamaño, en píxeles de la imagen original.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub class_label: String,
    pub confidence: f32,
    pub center_x: f32,
    pub center_y: f32,
    pub width: f32,
    pub height: f32,
}

/// Conjunto ordenado de detecciones, en el orden de la API.
pub type DetectionSet = Vec<Detection>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxCorners {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Detection {
    pub fn corners(&self) -> BoxCorners {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        BoxCorners {
            x1: self.center_x - half_w,
            y1: self.center_y - half_h,
            x2: self.center_x + half_w,
            y2: self.center_y + half_h,
        }
    }

    /// Texto de la etiqueta: `<label>: <confianza con 2 decimales>`.
    pub fn caption(&self) -> String {
        format!("{}: {:.2}", self.class_label, self.confidence)
    }
}
