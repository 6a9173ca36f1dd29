//! Decorative paws walking across the page.

use dioxus::prelude::*;
use petrescue_core::decor::{PawParade, FIRST_PAW_DELAY_MS, PAW_LIFETIME_MS};

use crate::js_bridge;

const PAW_CSS: &str = r#"
.paw-walk-ltr, .paw-walk-rtl {
    position: fixed;
    font-size: 28px;
    opacity: 0.35;
    pointer-events: none;
    z-index: 0;
}
.paw-walk-ltr { left: -40px; animation: paw-ltr 8s linear forwards; }
.paw-walk-rtl { right: -40px; animation: paw-rtl 8s linear forwards; }
@keyframes paw-ltr { to { transform: translateX(calc(100vw + 80px)); } }
@keyframes paw-rtl { to { transform: translateX(calc(-100vw - 80px)) scaleX(-1); } }
"#;

#[component]
pub fn WalkingPaws() -> Element {
    let mut parade = use_signal(PawParade::new);

    use_future(move || async move {
        js_bridge::sleep_ms(FIRST_PAW_DELAY_MS as u32).await;
        loop {
            parade.write().spawn(js_bridge::now_ms(), js_bridge::random);
            let interval = PawParade::spawn_interval_ms(js_bridge::random());

            js_bridge::sleep_ms(PAW_LIFETIME_MS as u32).await;
            parade.write().expire(js_bridge::now_ms());
            js_bridge::sleep_ms(interval.saturating_sub(PAW_LIFETIME_MS) as u32).await;
        }
    });

    let paws: Vec<(u64, &'static str, String)> = parade
        .read()
        .paws()
        .iter()
        .map(|paw| {
            let style = format!(
                "top: {:.0}%; animation-delay: {:.2}s;",
                paw.top_percent, paw.delay_s
            );
            (paw.id, paw.direction.css_class(), style)
        })
        .collect();

    rsx! {
        style { {PAW_CSS} }
        for (id, class, style) in paws {
            span {
                key: "{id}",
                class: class,
                style: "{style}",
                aria_hidden: "true",
                "🐾"
            }
        }
    }
}
