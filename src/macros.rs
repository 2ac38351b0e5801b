/// Prints a progress line prefixed with the local time.
/// You can pass in the starting time and it will also print how long it took from starting time to now.
/// ```
/// use bookscrap::info_time;
///
/// info_time!("str {}, {}", 1, 2);
/// let time = chrono::Local::now();
/// info_time!(time, "str {}, {}", 1, 2);
/// ```
#[macro_export]
macro_rules! info_time {
    ($strfm:literal $(,)? $($arg:expr),*) => {{
        let local_now = ::chrono::Local::now();
        println!("{:<30} : {}", local_now, format!($strfm, $($arg),*));
    }};
    ($time:expr, $strfm:literal $(,)? $($arg:expr),*) => {{
        let local_now = ::chrono::Local::now();
        println!(
            "{:<30} : {} (took {:.3} sec)",
            local_now,
            format!($strfm, $($arg),*),
            $crate::macros::elapsed_secs($time, local_now)
        );
    }};
}

/// Same as `info_time!` but goes to stderr.
#[macro_export]
macro_rules! warn_time {
    ($strfm:literal $(,)? $($arg:expr),*) => {{
        let local_now = ::chrono::Local::now();
        eprintln!("{:<30} : WARN {}", local_now, format!($strfm, $($arg),*));
    }};
}

#[doc(hidden)]
pub fn elapsed_secs(start: chrono::DateTime<chrono::Local>, now: chrono::DateTime<chrono::Local>) -> f64 {
    (now - start)
        .num_microseconds()
        .map(|n| n as f64 / 1_000_000.0)
        .unwrap_or(0.0)
}
