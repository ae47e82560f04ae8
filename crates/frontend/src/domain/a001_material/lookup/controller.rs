use contracts::domain::a001_material::aggregate::MaterialRecord;
use contracts::domain::a001_material::code::normalize_code;

use super::camera::{CameraLease, CameraStream};
use super::failure::LookupFailure;

/// Состояние экрана сканирования
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LookupState {
    #[default]
    Idle,
    Scanning,
    /// Код получен, ждём ответ сервера
    Loading { code: String },
    Resolved(MaterialRecord),
    NotFound { code: String },
    Error(String),
}

/// Билет цикла сканирования, выданный при входе в `Scanning`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanTicket {
    cycle: u64,
}

/// Запрос на поиск, который нужно отправить на сервер
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub cycle: u64,
    pub code: String,
}

/// Конечный автомат «захват кода → поиск → результат»
///
/// Асинхронная работа (камера, декодер, сеть) идёт снаружи; её результаты
/// возвращаются с номером цикла. Всё, что пришло от устаревшего цикла,
/// отбрасывается, а опоздавший поток камеры сразу закрывается.
pub struct LookupController<S: CameraStream> {
    state: LookupState,
    cycle: u64,
    camera: Option<CameraLease<S>>,
    candidate: Option<String>,
    pending: Option<u64>,
}

impl<S: CameraStream> Default for LookupController<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: CameraStream> LookupController<S> {
    pub fn new() -> Self {
        Self {
            state: LookupState::Idle,
            cycle: 0,
            camera: None,
            candidate: None,
            pending: None,
        }
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    /// Последний принятый код (со сканера или ручного ввода)
    pub fn candidate(&self) -> Option<&str> {
        self.candidate.as_deref()
    }

    pub fn is_lookup_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Активен ли ещё цикл сканирования, выданный этим билетом
    pub fn is_scan_active(&self, ticket: ScanTicket) -> bool {
        ticket.cycle == self.cycle && self.state == LookupState::Scanning
    }

    /// Закрывает камеру и делает все выданные билеты устаревшими
    fn advance_cycle(&mut self) -> u64 {
        self.camera = None;
        self.cycle += 1;
        self.cycle
    }

    /// Вход в `Scanning` с чистого листа
    ///
    /// Билет выдаётся только вместе с готовым декодером: без него камеру
    /// не запрашивают, состояние сразу становится ошибкой.
    pub fn start_scanning<D>(
        &mut self,
        decoder: Result<D, LookupFailure>,
    ) -> Result<(ScanTicket, D), LookupFailure> {
        let cycle = self.advance_cycle();
        self.pending = None;
        self.candidate = None;
        match decoder {
            Ok(decoder) => {
                self.state = LookupState::Scanning;
                Ok((ScanTicket { cycle }, decoder))
            }
            Err(failure) => {
                self.state = LookupState::Error(failure.to_string());
                Err(failure)
            }
        }
    }

    /// Сбросить результат/ошибку и снова запустить камеру
    pub fn rescan<D>(
        &mut self,
        decoder: Result<D, LookupFailure>,
    ) -> Result<(ScanTicket, D), LookupFailure> {
        log::debug!("rescan requested from {:?}", self.state);
        self.start_scanning(decoder)
    }

    /// Поле ручного ввода очищено, а кода ещё не было: можно вернуться к камере
    pub fn can_resume_scanning(&self) -> bool {
        self.state == LookupState::Idle && self.candidate.is_none() && self.pending.is_none()
    }

    /// Поток камеры открыт. Возвращает false, если поток не принят (и уже закрыт).
    pub fn camera_ready(&mut self, ticket: ScanTicket, stream: S) -> bool {
        if !self.is_scan_active(ticket) || self.camera.is_some() {
            drop(CameraLease::new(stream));
            return false;
        }
        self.camera = Some(CameraLease::new(stream));
        true
    }

    pub fn camera_failed(&mut self, ticket: ScanTicket, failure: LookupFailure) -> bool {
        if !self.is_scan_active(ticket) {
            return false;
        }
        self.camera = None;
        self.state = LookupState::Error(failure.to_string());
        true
    }

    /// Декодер распознал код. Только первый результат цикла даёт запрос.
    pub fn decoded(&mut self, ticket: ScanTicket, text: &str) -> Option<LookupRequest> {
        if !self.is_scan_active(ticket) {
            return None;
        }
        let code = normalize_code(text)?;
        Some(self.begin_lookup(code))
    }

    /// Ручной ввод: камера выключается, сразу идёт поиск
    pub fn submit_manual(&mut self, text: &str) -> Result<LookupRequest, LookupFailure> {
        let code = normalize_code(text).ok_or(LookupFailure::Validation)?;
        if self.pending.is_some() {
            return Err(LookupFailure::LookupInProgress);
        }
        Ok(self.begin_lookup(code))
    }

    /// Пользователь начал вводить код вручную: камеру освобождаем
    pub fn enter_manual_mode(&mut self) {
        if self.state == LookupState::Scanning {
            self.advance_cycle();
            self.state = LookupState::Idle;
        }
    }

    fn begin_lookup(&mut self, code: String) -> LookupRequest {
        let cycle = self.advance_cycle();
        self.candidate = Some(code.clone());
        self.pending = Some(cycle);
        self.state = LookupState::Loading { code: code.clone() };
        LookupRequest { cycle, code }
    }

    /// Ответ сервера. Ответы устаревших циклов игнорируются.
    pub fn complete_lookup(
        &mut self,
        cycle: u64,
        outcome: Result<MaterialRecord, LookupFailure>,
    ) -> bool {
        if self.pending != Some(cycle) || cycle != self.cycle {
            return false;
        }
        self.pending = None;
        self.state = match outcome {
            Ok(record) => LookupState::Resolved(record),
            Err(LookupFailure::NotFound) => LookupState::NotFound {
                code: self.candidate.clone().unwrap_or_default(),
            },
            Err(failure) => LookupState::Error(failure.to_string()),
        };
        true
    }

    /// Размонтирование экрана
    pub fn teardown(&mut self) {
        self.advance_cycle();
        self.pending = None;
        self.state = LookupState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Имитация устройства: считает открытые потоки
    #[derive(Clone, Default)]
    struct FakeCamera {
        open: Rc<Cell<u32>>,
        max_open: Rc<Cell<u32>>,
    }

    impl FakeCamera {
        fn open_stream(&self) -> FakeStream {
            self.open.set(self.open.get() + 1);
            self.max_open.set(self.max_open.get().max(self.open.get()));
            FakeStream {
                camera: self.clone(),
                closed: false,
            }
        }
    }

    struct FakeStream {
        camera: FakeCamera,
        closed: bool,
    }

    impl CameraStream for FakeStream {
        fn close(&mut self) {
            if !self.closed {
                self.closed = true;
                self.camera.open.set(self.camera.open.get() - 1);
            }
        }
    }

    fn cotton_twill() -> MaterialRecord {
        MaterialRecord {
            material_type: Some("Woven".into()),
            color: Some("Navy".into()),
            ..MaterialRecord::new("FABRIC-ABC-001", "Cotton Twill")
        }
    }

    /// Старт сканирования с доступным декодером
    fn scan(controller: &mut LookupController<FakeStream>) -> ScanTicket {
        let (ticket, ()) = controller.start_scanning(Ok(())).unwrap();
        ticket
    }

    fn rescan(controller: &mut LookupController<FakeStream>) -> ScanTicket {
        let (ticket, ()) = controller.rescan(Ok(())).unwrap();
        ticket
    }

    fn scanning_with_camera(camera: &FakeCamera) -> (LookupController<FakeStream>, ScanTicket) {
        let mut controller = LookupController::new();
        let ticket = scan(&mut controller);
        assert!(controller.camera_ready(ticket, camera.open_stream()));
        (controller, ticket)
    }

    #[test]
    fn test_empty_manual_code_is_validation_error_without_request() {
        let camera = FakeCamera::default();
        let (mut controller, ticket) = scanning_with_camera(&camera);

        for input in ["", "   "] {
            assert_eq!(
                controller.submit_manual(input),
                Err(LookupFailure::Validation)
            );
        }
        assert!(!controller.is_lookup_pending());
        assert_eq!(controller.state(), &LookupState::Scanning);
        assert!(controller.is_scan_active(ticket));
        assert_eq!(camera.open.get(), 1);
    }

    #[test]
    fn test_manual_code_while_scanning_closes_camera_and_resolves() {
        let camera = FakeCamera::default();
        let (mut controller, ticket) = scanning_with_camera(&camera);

        let request = controller.submit_manual(" FABRIC-ABC-001 ").unwrap();
        assert_eq!(request.code, "FABRIC-ABC-001");
        assert_eq!(camera.open.get(), 0);
        assert!(!controller.is_scan_active(ticket));
        assert_eq!(
            controller.state(),
            &LookupState::Loading {
                code: "FABRIC-ABC-001".into()
            }
        );

        // Второй запрос в том же цикле не выдаётся
        assert_eq!(
            controller.submit_manual("FABRIC-ABC-001"),
            Err(LookupFailure::LookupInProgress)
        );

        assert!(controller.complete_lookup(request.cycle, Ok(cotton_twill())));
        assert_eq!(controller.state(), &LookupState::Resolved(cotton_twill()));
        assert_eq!(controller.candidate(), Some("FABRIC-ABC-001"));
    }

    #[test]
    fn test_rescan_right_after_scanning_never_leaks_streams() {
        let camera = FakeCamera::default();
        let mut controller = LookupController::new();

        let first = scan(&mut controller);
        let second = rescan(&mut controller);

        // Поток первого цикла пришёл поздно: сразу закрыт
        assert!(!controller.camera_ready(first, camera.open_stream()));
        assert!(controller.camera_ready(second, camera.open_stream()));

        assert_eq!(camera.open.get(), 1);
        assert!(camera.max_open.get() <= 1);
    }

    #[test]
    fn test_rescan_with_open_stream_releases_it_first() {
        let camera = FakeCamera::default();
        let (mut controller, _) = scanning_with_camera(&camera);

        let ticket = rescan(&mut controller);
        assert_eq!(camera.open.get(), 0);
        assert!(controller.camera_ready(ticket, camera.open_stream()));
        assert_eq!(camera.open.get(), 1);
        assert_eq!(camera.max_open.get(), 1);
    }

    #[test]
    fn test_duplicate_decoder_emissions_yield_one_request() {
        let camera = FakeCamera::default();
        let (mut controller, ticket) = scanning_with_camera(&camera);

        let request = controller.decoded(ticket, "FABRIC-ABC-001");
        assert!(request.is_some());
        assert_eq!(camera.open.get(), 0);
        assert_eq!(controller.decoded(ticket, "FABRIC-ABC-001"), None);
        assert_eq!(controller.decoded(ticket, "FABRIC-XYZ-002"), None);
    }

    #[test]
    fn test_blank_decode_keeps_scanning() {
        let camera = FakeCamera::default();
        let (mut controller, ticket) = scanning_with_camera(&camera);

        assert_eq!(controller.decoded(ticket, "  "), None);
        assert!(controller.is_scan_active(ticket));
        assert_eq!(camera.open.get(), 1);
    }

    #[test]
    fn test_not_found_and_server_outcomes() {
        let camera = FakeCamera::default();
        let (mut controller, ticket) = scanning_with_camera(&camera);

        let request = controller.decoded(ticket, "UNKNOWN-999").unwrap();
        controller.complete_lookup(request.cycle, Err(LookupFailure::NotFound));
        assert_eq!(
            controller.state(),
            &LookupState::NotFound {
                code: "UNKNOWN-999".into()
            }
        );

        let request = controller.submit_manual("FABRIC-ABC-001").unwrap();
        controller.complete_lookup(
            request.cycle,
            Err(LookupFailure::Server("HTTP 502".into())),
        );
        assert_eq!(
            controller.state(),
            &LookupState::Error(LookupFailure::Server(String::new()).to_string())
        );
    }

    #[test]
    fn test_stale_lookup_result_is_ignored_after_rescan() {
        let mut controller: LookupController<FakeStream> = LookupController::new();
        let request = controller.submit_manual("FABRIC-ABC-001").unwrap();

        rescan(&mut controller);
        assert!(!controller.complete_lookup(request.cycle, Ok(cotton_twill())));
        assert_eq!(controller.state(), &LookupState::Scanning);
        assert_eq!(controller.candidate(), None);
    }

    #[test]
    fn test_camera_failure_becomes_error_state() {
        let mut controller = LookupController::new();
        let ticket = scan(&mut controller);

        assert!(controller.camera_failed(ticket, LookupFailure::CameraPermissionDenied));
        assert_eq!(
            controller.state(),
            &LookupState::Error(
                "카메라를 시작할 수 없습니다. 카메라 권한을 확인해주세요.".into()
            )
        );
        // Повторная ошибка того же цикла уже ничего не меняет
        assert!(!controller.camera_failed(ticket, LookupFailure::NoCameraAvailable));
    }

    #[test]
    fn test_manual_mode_releases_camera_and_rejects_late_stream() {
        let camera = FakeCamera::default();
        let mut controller = LookupController::new();
        let ticket = scan(&mut controller);

        controller.enter_manual_mode();
        assert_eq!(controller.state(), &LookupState::Idle);
        assert!(!controller.camera_ready(ticket, camera.open_stream()));
        assert_eq!(controller.decoded(ticket, "FABRIC-ABC-001"), None);
        assert_eq!(camera.open.get(), 0);
    }

    #[test]
    fn test_teardown_and_drop_release_camera() {
        let camera = FakeCamera::default();
        let (mut controller, _) = scanning_with_camera(&camera);
        controller.teardown();
        assert_eq!(camera.open.get(), 0);
        assert_eq!(controller.state(), &LookupState::Idle);

        let (controller, _) = scanning_with_camera(&camera);
        drop(controller);
        assert_eq!(camera.open.get(), 0);
    }

    #[test]
    fn test_missing_decoder_issues_no_ticket_and_keeps_camera_closed() {
        let camera = FakeCamera::default();
        let mut controller: LookupController<FakeStream> = LookupController::new();

        let started = controller.start_scanning(Err::<(), _>(LookupFailure::DecoderUnavailable));
        assert_eq!(started, Err(LookupFailure::DecoderUnavailable));
        assert_eq!(
            controller.state(),
            &LookupState::Error(LookupFailure::DecoderUnavailable.to_string())
        );
        assert_eq!(camera.open.get(), 0);
        assert_eq!(camera.max_open.get(), 0);
    }

    #[test]
    fn test_rescan_without_decoder_releases_open_camera() {
        let camera = FakeCamera::default();
        let (mut controller, ticket) = scanning_with_camera(&camera);

        assert!(controller
            .rescan(Err::<(), _>(LookupFailure::DecoderUnavailable))
            .is_err());
        assert_eq!(camera.open.get(), 0);
        assert!(!controller.is_scan_active(ticket));
        assert_eq!(controller.decoded(ticket, "FABRIC-ABC-001"), None);
    }

    #[test]
    fn test_clearing_manual_field_resumes_only_before_first_code() {
        let camera = FakeCamera::default();
        let (mut controller, _) = scanning_with_camera(&camera);
        assert!(!controller.can_resume_scanning());

        controller.enter_manual_mode();
        assert!(controller.can_resume_scanning());

        let request = controller.submit_manual("FABRIC-ABC-001").unwrap();
        assert!(!controller.can_resume_scanning());

        controller.complete_lookup(request.cycle, Ok(cotton_twill()));
        controller.enter_manual_mode();
        assert!(!controller.can_resume_scanning());
    }
}
