use js_sys::{Array, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{MediaDeviceInfo, MediaDeviceKind, MediaDevices, MediaStream, MediaStreamConstraints, MediaStreamTrack};

use crate::domain::a001_material::lookup::{select_camera, CameraInfo, CameraStream, LookupFailure};

/// Поток камеры браузера
pub struct WebCameraStream {
    stream: MediaStream,
}

impl WebCameraStream {
    pub fn media_stream(&self) -> &MediaStream {
        &self.stream
    }
}

impl CameraStream for WebCameraStream {
    fn close(&mut self) {
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
        log::debug!("camera stream {} closed", self.stream.id());
    }
}

fn media_devices() -> Result<MediaDevices, LookupFailure> {
    let window = web_sys::window().ok_or(LookupFailure::NoCameraAvailable)?;
    window.navigator().media_devices().map_err(|e| {
        log::warn!("navigator.mediaDevices unavailable: {e:?}");
        LookupFailure::NoCameraAvailable
    })
}

/// Список видеоустройств
pub async fn list_cameras() -> Result<Vec<CameraInfo>, LookupFailure> {
    let devices = media_devices()?;
    let promise = devices.enumerate_devices().map_err(|e| {
        log::warn!("enumerateDevices failed: {e:?}");
        LookupFailure::NoCameraAvailable
    })?;
    let list = JsFuture::from(promise).await.map_err(|e| {
        log::warn!("enumerateDevices rejected: {e:?}");
        LookupFailure::NoCameraAvailable
    })?;
    let list: Array = list.dyn_into().map_err(|_| LookupFailure::NoCameraAvailable)?;

    let cameras = list
        .iter()
        .filter_map(|item| item.dyn_into::<MediaDeviceInfo>().ok())
        .filter(|info| info.kind() == MediaDeviceKind::Videoinput)
        .map(|info| CameraInfo {
            device_id: info.device_id(),
            label: info.label(),
        })
        .collect::<Vec<_>>();

    log::info!("available cameras: {:?}", cameras);
    Ok(cameras)
}

/// Ограничения getUserMedia для выбранной камеры
fn video_constraints(camera: &CameraInfo) -> Result<JsValue, JsValue> {
    let video = Object::new();
    if camera.device_id.is_empty() {
        // До выдачи разрешения часть браузеров скрывает deviceId
        Reflect::set(&video, &"facingMode".into(), &"environment".into())?;
    } else {
        let device_id = Object::new();
        Reflect::set(&device_id, &"exact".into(), &camera.device_id.as_str().into())?;
        Reflect::set(&video, &"deviceId".into(), &device_id)?;
    }
    Ok(video.into())
}

/// Открыть предпочтительную (заднюю) камеру
pub async fn open_preferred_camera() -> Result<WebCameraStream, LookupFailure> {
    let cameras = list_cameras().await?;
    let camera = select_camera(&cameras)?;
    if camera.is_rear_facing() {
        log::info!("selected rear camera {} ({})", camera.device_id, camera.label);
    } else {
        log::warn!(
            "rear camera not found, using first camera {} ({})",
            camera.device_id,
            camera.label
        );
    }

    let constraints = MediaStreamConstraints::new();
    let video = video_constraints(camera).map_err(|e| {
        log::error!("failed to build video constraints: {e:?}");
        LookupFailure::CameraPermissionDenied
    })?;
    constraints.set_video(&video);
    constraints.set_audio(&JsValue::FALSE);

    let devices = media_devices()?;
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| {
            log::warn!("getUserMedia failed: {e:?}");
            LookupFailure::CameraPermissionDenied
        })?;
    let stream = JsFuture::from(promise).await.map_err(|e| {
        log::warn!("getUserMedia rejected: {e:?}");
        LookupFailure::CameraPermissionDenied
    })?;
    let stream: MediaStream = stream
        .dyn_into()
        .map_err(|_| LookupFailure::CameraPermissionDenied)?;

    Ok(WebCameraStream { stream })
}
