//! Распознавание QR кода в RGBA кадре без браузерного детектора

/// Кадр уменьшается до этой ширины перед распознаванием
pub const MAX_FRAME_WIDTH: u32 = 640;

/// Размер кадра для распознавания с сохранением пропорций
pub fn scaled_frame_size(width: u32, height: u32) -> (u32, u32) {
    if width <= MAX_FRAME_WIDTH || width == 0 {
        return (width, height);
    }
    let scaled_height = (u64::from(height) * u64::from(MAX_FRAME_WIDTH) / u64::from(width)) as u32;
    (MAX_FRAME_WIDTH, scaled_height.max(1))
}

/// RGBA → яркость (BT.601, целочисленно)
pub fn rgba_to_luma(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4)
        .map(|p| {
            let luma = u32::from(p[0]) * 299 + u32::from(p[1]) * 587 + u32::from(p[2]) * 114;
            (luma / 1000) as u8
        })
        .collect()
}

/// Текст первого читаемого QR кода в кадре
pub fn decode_rgba(width: usize, height: usize, rgba: &[u8]) -> Option<String> {
    if width == 0 || height == 0 || rgba.len() < width * height * 4 {
        return None;
    }
    let luma = rgba_to_luma(rgba);
    let mut prepared =
        rqrr::PreparedImage::prepare_from_greyscale(width, height, |x, y| luma[y * width + x]);
    prepared
        .detect_grids()
        .into_iter()
        .find_map(|grid| grid.decode().ok().map(|(_, content)| content))
}
