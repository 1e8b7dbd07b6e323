//! User-facing console lines for the CLI.
//! Colored prefixes only when stdout is a TTY, so scripted output stays plain.

use owo_colors::OwoColorize;

#[derive(Clone, Copy)]
enum Tone {
    Info,
    Warn,
    Error,
    Ok,
}

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn emit(tone: Tone, msg: &str) {
    let plain = match tone {
        Tone::Info => "info:",
        Tone::Warn => "warn:",
        Tone::Error => "error:",
        Tone::Ok => "ok:",
    };
    let prefix = if is_tty() {
        match tone {
            Tone::Info => plain.cyan().bold().to_string(),
            Tone::Warn => plain.yellow().bold().to_string(),
            Tone::Error => plain.red().bold().to_string(),
            Tone::Ok => plain.green().bold().to_string(),
        }
    } else {
        plain.to_string()
    };
    match tone {
        Tone::Info | Tone::Ok => println!("{prefix} {msg}"),
        Tone::Warn | Tone::Error => eprintln!("{prefix} {msg}"),
    }
}

pub fn print_info(msg: &str) {
    emit(Tone::Info, msg);
}

pub fn print_warn(msg: &str) {
    emit(Tone::Warn, msg);
}

pub fn print_error(msg: &str) {
    emit(Tone::Error, msg);
}

pub fn print_success(msg: &str) {
    emit(Tone::Ok, msg);
}

/// A bare result line (hash, path, byte count) that scripts can consume.
pub fn print_user(msg: &str) {
    println!("{msg}");
}
