/// Color RGB de 8 bits por canal.
pub type Rgb = [u8; 3];

pub const RED: Rgb = [255, 0, 0];
pub const BLUE: Rgb = [0, 0, 255];
pub const GREEN: Rgb = [0, 128, 0];
pub const YELLOW: Rgb = [255, 255, 0];
pub const ORANGE: Rgb = [255, 165, 0];
pub const PURPLE: Rgb = [128, 0, 128];
pub const CYAN: Rgb = [0, 255, 255];
pub const WHITE: Rgb = [255, 255, 255];

/// Tabla fija etiqueta -> color de trazo.
pub const LABEL_COLORS: [(&str, Rgb); 7] = [
    ("Person", RED),
    ("goggles", BLUE),
    ("helmet", GREEN),
    ("vest", YELLOW),
    ("no-vest", ORANGE),
    ("no-goggles", PURPLE),
    ("no-helmet", CYAN),
];

/// Color para etiquetas desconocidas.
pub const FALLBACK_COLOR: Rgb = WHITE;

pub fn color_for(label: &str) -> Rgb {
    LABEL_COLORS
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}

pub fn to_hex(color: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}
