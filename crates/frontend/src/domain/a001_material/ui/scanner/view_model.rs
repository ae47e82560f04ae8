use gloo_timers::future::TimeoutFuture;
use leptos::html::Video;
use leptos::prelude::*;

use super::model;
use crate::domain::a001_material::lookup::{
    CameraStream, LookupController, LookupFailure, LookupRequest, LookupState, ScanTicket,
};
use crate::shared::media::{open_preferred_camera, QrFrameDecoder, WebCameraStream};

/// ~10 кадров в секунду
const DECODE_INTERVAL_MS: u32 = 100;

/// ViewModel экрана сканирования
///
/// Контроллер держит поток камеры (не Send), поэтому лежит в локальном
/// хранилище; представление читает зеркальные сигналы.
#[derive(Clone, Copy)]
pub struct MaterialScannerViewModel {
    controller: StoredValue<LookupController<WebCameraStream>, LocalStorage>,
    pub state: RwSignal<LookupState>,
    pub scanned_code: RwSignal<Option<String>>,
    pub manual_code: RwSignal<String>,
    pub notice: RwSignal<Option<String>>,
    pub video_ref: NodeRef<Video>,
}

impl MaterialScannerViewModel {
    pub fn new() -> Self {
        Self {
            controller: StoredValue::new_local(LookupController::new()),
            state: RwSignal::new(LookupState::Idle),
            scanned_code: RwSignal::new(None),
            manual_code: RwSignal::new(String::new()),
            notice: RwSignal::new(None),
            video_ref: NodeRef::new(),
        }
    }

    pub fn is_scanning(&self) -> impl Fn() -> bool + Copy + 'static {
        let state = self.state;
        move || state.get() == LookupState::Scanning
    }

    /// Скопировать состояние контроллера в сигналы
    fn sync(&self) {
        let snapshot = self
            .controller
            .try_with_value(|c| (c.state().clone(), c.candidate().map(str::to_string)));
        if let Some((state, candidate)) = snapshot {
            self.state.set(state);
            self.scanned_code.set(candidate);
        }
    }

    /// Запуск камеры при монтировании
    ///
    /// Декодер проверяется до запроса камеры.
    pub fn start_scanning(&self) {
        let decoder = QrFrameDecoder::new();
        let Some(started) = self.controller.try_update_value(|c| c.start_scanning(decoder)) else {
            return;
        };
        self.notice.set(None);
        self.sync();
        self.on_scan_started(started);
    }

    /// Кнопка «다시 스캔»
    pub fn rescan_command(&self) {
        let decoder = QrFrameDecoder::new();
        let Some(started) = self.controller.try_update_value(|c| c.rescan(decoder)) else {
            return;
        };
        self.manual_code.set(String::new());
        self.notice.set(None);
        self.detach_preview();
        self.sync();
        self.on_scan_started(started);
    }

    /// Ввод в поле ручного кода: камера освобождается.
    /// Очистка поля до первого кода снова включает камеру.
    pub fn manual_input(&self, value: String) {
        let cleared = value.trim().is_empty();
        self.manual_code.set(value);
        self.notice.set(None);

        let resume = cleared
            && self
                .controller
                .try_with_value(|c| c.can_resume_scanning())
                .unwrap_or(false);
        if resume {
            log::debug!("manual field cleared, resuming camera scan");
            self.start_scanning();
            return;
        }

        self.controller.try_update_value(|c| c.enter_manual_mode());
        self.detach_preview();
        self.sync();
    }

    fn on_scan_started(&self, started: Result<(ScanTicket, QrFrameDecoder), LookupFailure>) {
        match started {
            Ok((ticket, decoder)) => self.acquire_camera(ticket, decoder),
            Err(failure) => log::error!("QR decoding unavailable, camera not requested: {failure}"),
        }
    }

    /// Кнопка «조회»
    pub fn search_command(&self) {
        let text = self.manual_code.get_untracked();
        let Some(result) = self.controller.try_update_value(|c| c.submit_manual(&text)) else {
            return;
        };
        match result {
            Ok(request) => {
                self.notice.set(None);
                self.detach_preview();
                self.sync();
                self.dispatch_lookup(request);
            }
            Err(failure) => {
                log::warn!("manual lookup rejected: {failure}");
                self.notice.set(Some(failure.to_string()));
            }
        }
    }

    /// Размонтирование: освободить камеру, забыть незавершённые циклы
    pub fn teardown(&self) {
        self.controller.try_update_value(|c| c.teardown());
        self.detach_preview();
    }

    fn acquire_camera(&self, ticket: ScanTicket, decoder: QrFrameDecoder) {
        let vm = *self;
        wasm_bindgen_futures::spawn_local(async move {
            match open_preferred_camera().await {
                Ok(stream) => {
                    let media = stream.media_stream().clone();
                    let mut slot = Some(stream);
                    let accepted = vm
                        .controller
                        .try_update_value(|c| match slot.take() {
                            Some(stream) => c.camera_ready(ticket, stream),
                            None => false,
                        })
                        .unwrap_or(false);
                    if let Some(mut orphan) = slot.take() {
                        // Экран уже размонтирован
                        orphan.close();
                        return;
                    }
                    if accepted {
                        vm.attach_preview(&media);
                        vm.run_decoder(ticket, decoder);
                    } else {
                        log::debug!("camera stream arrived for a finished scan cycle, closed");
                    }
                }
                Err(failure) => {
                    log::error!("camera start failed: {failure}");
                    vm.controller
                        .try_update_value(|c| c.camera_failed(ticket, failure));
                    vm.sync();
                }
            }
        });
    }

    fn attach_preview(&self, media: &web_sys::MediaStream) {
        if let Some(video) = self.video_ref.get_untracked() {
            video.set_muted(true);
            video.set_src_object(Some(media));
            if let Err(e) = video.play() {
                log::warn!("video preview did not start: {e:?}");
            }
        }
    }

    fn detach_preview(&self) {
        if let Some(video) = self.video_ref.get_untracked() {
            video.set_src_object(None);
        }
    }

    fn run_decoder(&self, ticket: ScanTicket, decoder: QrFrameDecoder) {
        let vm = *self;
        wasm_bindgen_futures::spawn_local(async move {
            loop {
                TimeoutFuture::new(DECODE_INTERVAL_MS).await;

                let active = vm
                    .controller
                    .try_with_value(|c| c.is_scan_active(ticket))
                    .unwrap_or(false);
                if !active {
                    break;
                }
                let Some(video) = vm.video_ref.get_untracked() else {
                    continue;
                };
                let Some(text) = decoder.decode(&video).await else {
                    continue;
                };

                log::info!("QR code decoded: {}", text);
                let request = vm
                    .controller
                    .try_update_value(|c| c.decoded(ticket, &text))
                    .flatten();
                if let Some(request) = request {
                    vm.detach_preview();
                    vm.sync();
                    vm.dispatch_lookup(request);
                    break;
                }
            }
        });
    }

    fn dispatch_lookup(&self, request: LookupRequest) {
        let vm = *self;
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = model::fetch_material(&request.code).await;
            match &outcome {
                Ok(record) => log::info!("material resolved: {}", record.material_name),
                Err(failure) => log::warn!(
                    "material lookup for {} failed: {} {:?}",
                    request.code,
                    failure,
                    failure.detail()
                ),
            }
            vm.controller
                .try_update_value(|c| c.complete_lookup(request.cycle, outcome));
            vm.sync();
        });
    }
}

impl Default for MaterialScannerViewModel {
    fn default() -> Self {
        Self::new()
    }
}
