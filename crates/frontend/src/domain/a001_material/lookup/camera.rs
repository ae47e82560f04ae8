use super::failure::LookupFailure;

/// Открытый видеопоток камеры
pub trait CameraStream {
    /// Остановить все треки и освободить устройство. Повторный вызов безопасен.
    fn close(&mut self);
}

/// Владение открытым потоком: поток закрывается при drop
pub struct CameraLease<S: CameraStream> {
    stream: Option<S>,
}

impl<S: CameraStream> CameraLease<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream: Some(stream),
        }
    }
}

impl<S: CameraStream> Drop for CameraLease<S> {
    fn drop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.close();
        }
    }
}

/// Видеоустройство из enumerateDevices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraInfo {
    pub device_id: String,
    pub label: String,
}

const REAR_CAMERA_KEYWORDS: [&str; 3] = ["back", "environment", "rear"];

impl CameraInfo {
    pub fn is_rear_facing(&self) -> bool {
        let label = self.label.to_lowercase();
        REAR_CAMERA_KEYWORDS.iter().any(|k| label.contains(k))
    }
}

/// Выбор камеры: задняя по метке, иначе первая доступная
pub fn select_camera(cameras: &[CameraInfo]) -> Result<&CameraInfo, LookupFailure> {
    cameras
        .iter()
        .find(|c| c.is_rear_facing())
        .or_else(|| cameras.first())
        .ok_or(LookupFailure::NoCameraAvailable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn camera(id: &str, label: &str) -> CameraInfo {
        CameraInfo {
            device_id: id.into(),
            label: label.into(),
        }
    }

    #[test]
    fn test_prefers_rear_facing_label() {
        let cameras = vec![
            camera("front", "FaceTime HD Camera"),
            camera("wide", "Camera 2, facing back"),
            camera("env", "Environment Camera"),
        ];
        assert_eq!(select_camera(&cameras).unwrap().device_id, "wide");
    }

    #[test]
    fn test_label_match_is_case_insensitive() {
        let cameras = vec![camera("a", "USB Webcam"), camera("b", "REAR Camera")];
        assert_eq!(select_camera(&cameras).unwrap().device_id, "b");
    }

    #[test]
    fn test_falls_back_to_first_camera() {
        let cameras = vec![camera("a", ""), camera("b", "Front Camera")];
        assert_eq!(select_camera(&cameras).unwrap().device_id, "a");
    }

    #[test]
    fn test_no_cameras() {
        assert_eq!(select_camera(&[]), Err(LookupFailure::NoCameraAvailable));
    }

    struct CountingStream(Rc<Cell<u32>>);

    impl CameraStream for CountingStream {
        fn close(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_lease_closes_stream_on_drop() {
        let closes = Rc::new(Cell::new(0));
        let lease = CameraLease::new(CountingStream(closes.clone()));
        assert_eq!(closes.get(), 0);
        drop(lease);
        assert_eq!(closes.get(), 1);
    }
}
