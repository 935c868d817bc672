#![forbid(unsafe_code)]
#![deny(
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Course discussions entry point. The browser build mounts the forum; a native build only
//! reports the settings that were compiled in, since LMS endpoints are fixed at build time.

#[cfg(target_arch = "wasm32")]
fn main() {
    forum_ui::run_app();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::io::Result<()> {
    use std::io::Write;

    let inputs = forum_config::ConfigInputs::from_build_env();
    let notice = match forum_config::AppConfig::from_inputs(&inputs) {
        Ok(config) => native_notice(&config),
        Err(err) => format!("forum-ui: build-time configuration is invalid: {err}\n"),
    };
    std::io::stderr().lock().write_all(notice.as_bytes())
}

/// What a native run prints: the compiled-in LMS settings and how to get a browser bundle.
#[cfg(not(target_arch = "wasm32"))]
fn native_notice(config: &forum_config::AppConfig) -> String {
    format!(
        "forum-ui runs in the browser; build it for wasm32-unknown-unknown.\n\
         LMS_BASE_URL={}\n\
         LEARNING_BASE_URL={}\n\
         POST_MARK_AS_READ_DELAY={}\n\
         These values are read when the bundle is compiled; set them in the build environment.\n",
        config.lms_base_url,
        config.learning_base_url.as_deref().unwrap_or("(unset)"),
        config.post_mark_as_read_delay_ms,
    )
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use forum_config::{AppConfig, ConfigInputs};

    #[test]
    fn notice_lists_the_compiled_settings() {
        let config = AppConfig::from_inputs(&ConfigInputs {
            lms_base_url: Some("https://lms.example.org/".to_string()),
            ..ConfigInputs::default()
        })
        .expect("valid inputs");
        let notice = native_notice(&config);
        assert!(notice.contains("LMS_BASE_URL=https://lms.example.org\n"));
        assert!(notice.contains("LEARNING_BASE_URL=(unset)"));
        assert!(notice.contains("POST_MARK_AS_READ_DELAY=2000"));
    }

    #[test]
    fn native_main_reports_without_failing() -> std::io::Result<()> {
        main()
    }
}
