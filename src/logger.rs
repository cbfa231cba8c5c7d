use env_logger::Builder;
use std::io::Write;

fn with_format(builder: &mut Builder) -> &mut Builder {
    builder.format(|buf, record| {
        writeln!(
            buf,
            "[{} {}] {}",
            buf.timestamp_millis(),
            record.level(),
            record.args()
        )
    })
}

/// Logger writing to stderr, filtered by `RUST_LOG`.
pub fn build_logger() {
    let mut builder = Builder::from_default_env();
    with_format(&mut builder).init();
}
