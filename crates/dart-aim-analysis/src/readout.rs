//! Cursor-style value read-out for scalar fields.

use dart_aim_core::ScalarField;

/// Nearest pixel `(col, row)` for continuous image coordinates, if inside.
///
/// Rounds with `floor(v + 0.5)`, so `x` in `(-1, -0.5)` is outside rather
/// than truncated onto column 0.
pub fn pixel_under(field: &ScalarField, x: f64, y: f64) -> Option<(usize, usize)> {
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    let col = (x + 0.5).floor();
    let row = (y + 0.5).floor();
    if col < 0.0 || row < 0.0 || col >= field.width as f64 || row >= field.height as f64 {
        return None;
    }
    Some((col as usize, row as usize))
}

/// `x=…, y=…, z=…` for a position inside the field, `x=…, y=…` outside.
pub fn format_coord(field: &ScalarField, x: f64, y: f64) -> String {
    match pixel_under(field, x, y).and_then(|(col, row)| field.get(col, row)) {
        Some(z) => format!("x={x:.4}, y={y:.4}, z={z:.4}"),
        None => format!("x={x:.4}, y={y:.4}"),
    }
}
