use contracts::domain::a001_material::aggregate::MaterialRecord;
use leptos::prelude::*;

use super::view_model::MaterialScannerViewModel;
use crate::domain::a001_material::lookup::{LookupFailure, LookupState};
use crate::system::session::use_session;

#[component]
pub fn MaterialScanner() -> impl IntoView {
    let vm = MaterialScannerViewModel::new();
    let session = use_session();

    // Камера стартует один раз после монтирования video
    Effect::new(move |_| untrack(|| vm.start_scanning()));
    on_cleanup(move || vm.teardown());

    let is_scanning = vm.is_scanning();

    view! {
        <div class="scanner-container">
            <h2>"QR 코드 스캔"</h2>

            <Show when=is_scanning>
                <p class="scanner-hint">"카메라를 QR 코드에 비춰주세요."</p>
            </Show>

            <div class="scanner-preview">
                <video
                    node_ref=vm.video_ref
                    autoplay=true
                    playsinline=true
                    muted=true
                    style:display=move || if is_scanning() { "block" } else { "none" }
                ></video>
                <Show when=is_scanning>
                    <p class="scanner-status">"QR 코드 스캔 중..."</p>
                </Show>
            </div>

            <div class="manual-input">
                <p>"또는 QR 코드 ID 직접 입력"</p>
                <input
                    type="text"
                    placeholder="QR 코드 ID 입력 (예: FABRIC-ABC-001)"
                    prop:value=move || vm.manual_code.get()
                    on:input=move |ev| vm.manual_input(event_target_value(&ev))
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            vm.search_command();
                        }
                    }
                />
                <button class="btn-primary" on:click=move |_| vm.search_command()>
                    "조회"
                </button>
            </div>

            {move || vm.notice.get().map(|text| view! { <div class="warning">{text}</div> })}

            {move || {
                vm.scanned_code
                    .get()
                    .map(|code| {
                        view! {
                            <p class="scanned-code">
                                "스캔된 QR 코드: " <strong>{code}</strong>
                            </p>
                        }
                    })
            }}

            {move || match vm.state.get() {
                LookupState::Idle | LookupState::Scanning => ().into_any(),
                LookupState::Loading { .. } => {
                    view! { <p class="loading">"소재 정보를 불러오는 중..."</p> }.into_any()
                }
                LookupState::Resolved(record) => view! { <MaterialCard record=record /> }.into_any(),
                LookupState::NotFound { .. } => {
                    view! { <div class="error">{LookupFailure::NotFound.to_string()}</div> }
                        .into_any()
                }
                LookupState::Error(message) => view! { <div class="error">{message}</div> }.into_any(),
            }}

            <div class="scanner-actions">
                <Show when=move || !is_scanning()>
                    <button class="btn-secondary" on:click=move |_| vm.rescan_command()>
                        "다시 스캔"
                    </button>
                </Show>
                <button class="btn-logout" on:click=move |_| session.sign_out()>
                    "로그아웃"
                </button>
            </div>
        </div>
    }
}

/// Карточка найденного материала; пустые поля не показываются
#[component]
fn MaterialCard(record: MaterialRecord) -> impl IntoView {
    let features = record.features_display();
    let row = |label: &'static str, value: Option<String>| {
        value.map(|value| {
            view! {
                <div class="material-row">
                    <span class="material-label">{label}</span>
                    <span class="material-value">{value}</span>
                </div>
            }
        })
    };

    view! {
        <div class="material-card">
            <h3>"소재 정보"</h3>
            {row("소재 이름", Some(record.material_name))}
            {row("타입", record.material_type)}
            {row("색상", record.color)}
            {row("제조사", record.manufacturer)}
            {row("생산일", record.production_date)}
            {row("특징", features)}
            {row("관리 방법", record.care_instructions)}
            {record
                .image_url
                .map(|url| view! { <img class="material-image" src=url alt="소재 이미지" /> })}
        </div>
    }
}
