//! 日志初始化
//!
//! 使用 `tracing` 记录日志，订阅器将格式化后的每一行转发到浏览器控制台。

use std::io;

use tracing_subscriber::fmt::MakeWriter;

use crate::config::AppConfig;

/// 将日志写入 `console.log` 的 writer
#[derive(Default)]
pub struct ConsoleWriter {
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&self.buf);
        emit(line.trim_end());
        self.buf.clear();
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(line: &str) {
    web_sys::console::log_1(&line.into());
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(line: &str) {
    eprintln!("{}", line);
}

/// `MakeWriter` 实现：每个日志事件创建一个新的缓冲 writer
pub struct Console;

impl<'a> MakeWriter<'a> for Console {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::default()
    }
}

/// 安装全局订阅器。重复调用时保留第一次的订阅器。
pub fn init(config: &AppConfig) {
    let installed = tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(Console)
        .without_time()
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
