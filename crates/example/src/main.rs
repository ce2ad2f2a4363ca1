//! Example login form CLI.
//!
//! Rebuilds the login form repeatedly for one UI locale and logs the result
//! together with the cache counters.
//!
//! # Usage
//!
//! ```bash
//! form_demo [locale] [iterations]
//! ```
//!
//! # Example
//!
//! ```bash
//! VELLUM_LOG=vellum_manager=debug,info form_demo de-AT 1000
//! ```

use example::{LoginForm, login_resources};
use std::process::ExitCode;
use vellum_core::TracingConfig;
use vellum_manager::locale::set_current_ui_locale;
use vellum_resources::Locale;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    TracingConfig::from_env().init();

    let mut args = std::env::args().skip(1);
    let locale = args.next().map_or_else(Locale::invariant, |tag| Locale::new(&tag));
    let iterations = match args.next().map(|count| count.parse::<usize>()) {
        None => 1,
        Some(Ok(count)) => count.max(1),
        Some(Err(err)) => {
            tracing::error!(error = %err, "iterations must be a positive integer");
            return ExitCode::FAILURE;
        }
    };

    set_current_ui_locale(locale.clone());
    let resources = LoginForm::resource_manager(login_resources());

    let mut form = LoginForm::default();
    for _ in 0..iterations {
        form = match LoginForm::initialize_component(&resources) {
            Ok(form) => form,
            Err(err) => {
                tracing::error!(error = %err, "failed to initialize the login form");
                return ExitCode::FAILURE;
            }
        };
    }

    let caption = LoginForm::caption(&resources).unwrap_or_default();
    tracing::info!(
        %locale,
        %caption,
        title = %form.title.text,
        tool_tip = form.title.tool_tip.as_deref(),
        placeholder = %form.user_name.placeholder,
        ok = %form.ok.text,
        ok_width = form.ok.width,
        recent = ?form.recent.entries(),
        "login form ready"
    );

    let stats = resources.caches().stats();
    tracing::info!(
        iterations,
        plan_hits = stats.plan_hits,
        plan_misses = stats.plan_misses,
        compiled_plans = stats.compiled_plans,
        cached_objects = stats.cached_objects,
        "resource cache statistics"
    );

    ExitCode::SUCCESS
}
