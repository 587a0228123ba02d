#![allow(dead_code)]

use std::collections::VecDeque;

use embassy_time::{Duration, Timer};
use embedded_io_async::{ErrorKind, ErrorType, Read, Write};
use led_switch::actuator::Actuator;
use led_switch::connection::Connection;

/// One scripted event on the client side of a connection.
#[derive(Debug, Clone, Copy)]
pub enum Step {
    Data(&'static [u8]),
    Delay(Duration),
    /// Never send anything again, never close.
    Hang,
    /// Close the stream.
    Eof,
}

/// In-memory duplex stream: reads follow a script, writes are collected.
#[derive(Debug, Default)]
pub struct ScriptedStream {
    input: VecDeque<Step>,
    pub output: Vec<u8>,
    pub flushes: usize,
    pub fail_writes: bool,
    pub closed: bool,
}

impl ScriptedStream {
    pub fn new(steps: &[Step]) -> Self {
        Self {
            input: steps.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn request(raw: &'static str) -> Self {
        Self::new(&[Step::Data(raw.as_bytes()), Step::Eof])
    }

    pub fn output_text(&self) -> &str {
        std::str::from_utf8(&self.output).expect("response is UTF-8")
    }
}

impl ErrorType for ScriptedStream {
    type Error = ErrorKind;
}

impl Read for ScriptedStream {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        loop {
            match self.input.front().copied() {
                None | Some(Step::Eof) => return Ok(0),
                Some(Step::Hang) => core::future::pending::<()>().await,
                Some(Step::Delay(delay)) => {
                    self.input.pop_front();
                    Timer::after(delay).await;
                }
                Some(Step::Data(data)) => {
                    self.input.pop_front();
                    let n = data.len().min(buf.len());
                    buf[..n].copy_from_slice(&data[..n]);
                    if n < data.len() {
                        self.input.push_front(Step::Data(&data[n..]));
                    }
                    return Ok(n);
                }
            }
        }
    }
}

impl Write for ScriptedStream {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.fail_writes {
            return Err(ErrorKind::ConnectionReset);
        }
        self.output.extend_from_slice(buf);
        Ok(buf.len())
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }
}

impl Connection for ScriptedStream {
    fn close(&mut self) {
        self.closed = true;
    }
}

#[derive(Debug, Default)]
pub struct FakeLed {
    on: bool,
    pub switches: usize,
}

impl Actuator for FakeLed {
    fn turn_on(&mut self) {
        self.on = true;
        self.switches += 1;
    }

    fn turn_off(&mut self) {
        self.on = false;
        self.switches += 1;
    }

    fn is_on(&self) -> bool {
        self.on
    }
}
