use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

lazy_static! {
    pub static ref QUIZ_QUESTIONS_SERVED: IntCounterVec = register_int_counter_vec!(
        "quiz_questions_served_total",
        "Number of questions handed out to quiz rounds",
        &["scope"]
    )
    .expect("quiz_questions_served_total registers once");
    pub static ref QUIZZES_EXHAUSTED: IntCounter = register_int_counter!(
        "quizzes_exhausted_total",
        "Number of quiz requests with no unseen question left"
    )
    .expect("quizzes_exhausted_total registers once");
}

/// Logs to stdout. `LOG_LEVEL` takes `EnvFilter` directives and falls back to
/// `info`, `INCLUDE_SPAN_EVENTS=true` also logs span enter and exit.
pub fn init_tracing() {
    let span_events = match std::env::var("INCLUDE_SPAN_EVENTS") {
        Ok(value) if value.eq_ignore_ascii_case("true") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::NONE,
    };
    let filter = log_filter(std::env::var("LOG_LEVEL").ok().as_deref());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_span_events(span_events))
        .init();
}

fn log_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives.unwrap_or_default())
}
