//! In-memory TMCL board used by the integration tests.
//!
//! Answers every request frame written to it with a reply frame, keeps a
//! register file and per-axis parameters, and moves the position counter
//! toward the target each time the position is read.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};

use embedded_hal::delay::DelayNs;
use trinamic_eval::tmcl::{Command, Reply, Request, Status, FRAME_LEN, HOST_ADDRESS};
use trinamic_eval::tmc5160::registers;
use trinamic_eval::{AxisParameter, BoardKind};

/// TMC5160 reset value of CHOPCONF (MRES = 0, 256 microsteps).
pub const CHOPCONF_RESET: u32 = 0x1041_0150;

/// Microsteps the simulated axis covers per position read.
pub const TRAVEL_PER_READ: i32 = 100_000;

#[derive(Debug, Default, Clone, Copy)]
pub struct Axis {
    pub position: i32,
    pub target: i32,
    pub moving: bool,
}

pub struct SimBoard {
    pub kind: BoardKind,
    pub module_address: u8,
    pub firmware: i32,
    pub registers: HashMap<u8, u32>,
    pub parameters: HashMap<(u8, u8), i32>,
    pub axes: Vec<Axis>,
    /// Requests received, in order.
    pub requests: Vec<Request>,
    /// Ignore move commands, so the position never reaches the target.
    pub stuck: bool,
    /// Flip the checksum of the next reply.
    pub corrupt_next: bool,
    rx: Vec<u8>,
    tx: VecDeque<u8>,
}

impl SimBoard {
    pub fn new(kind: BoardKind) -> Self {
        let mut register_file = HashMap::new();
        register_file.insert(registers::CHOPCONF.address, CHOPCONF_RESET);

        Self {
            kind,
            module_address: 1,
            // Module type 0x0010, V1.05
            firmware: 0x0010_0105,
            registers: register_file,
            parameters: HashMap::new(),
            axes: vec![Axis::default(); kind.motor_count() as usize],
            requests: Vec::new(),
            stuck: false,
            corrupt_next: false,
            rx: Vec::new(),
            tx: VecDeque::new(),
        }
    }

    pub fn register(&self, register: registers::Register) -> u32 {
        self.registers.get(&register.address).copied().unwrap_or(0)
    }

    pub fn parameter(&self, motor: u8, parameter: AxisParameter) -> Option<i32> {
        self.parameters.get(&(motor, parameter.number())).copied()
    }

    /// Requests carrying `command`, in order.
    pub fn sent(&self, command: Command) -> Vec<Request> {
        self.requests
            .iter()
            .filter(|r| r.command == command.code())
            .copied()
            .collect()
    }

    /// Register addresses written with WRITE_MC, in order.
    pub fn register_writes(&self) -> Vec<u8> {
        self.sent(Command::WriteMc).iter().map(|r| r.type_number).collect()
    }

    fn execute(&mut self, request: Request) -> (Status, i32) {
        let motor = request.motor_bank as usize;
        let command = match Command::try_from(request.command) {
            Ok(command) => command,
            Err(_) => return (Status::InvalidCommand, 0),
        };

        match command {
            Command::GetFirmwareVersion => (Status::Success, self.firmware),
            Command::WriteMc | Command::ReadMc if !self.kind.has_register_access() => {
                (Status::InvalidCommand, 0)
            }
            Command::WriteMc => {
                self.registers.insert(request.type_number, request.value as u32);
                (Status::Success, request.value)
            }
            Command::ReadMc => {
                let value = self.registers.get(&request.type_number).copied().unwrap_or(0);
                (Status::Success, value as i32)
            }
            _ if motor >= self.axes.len() => (Status::InvalidValue, 0),
            Command::RotateRight => {
                self.axes[motor].position = self.axes[motor].position.wrapping_add(request.value);
                (Status::Success, 0)
            }
            Command::RotateLeft => {
                self.axes[motor].position = self.axes[motor].position.wrapping_sub(request.value);
                (Status::Success, 0)
            }
            Command::MotorStop => {
                self.axes[motor].moving = false;
                (Status::Success, 0)
            }
            Command::MoveToPosition => {
                let axis = &mut self.axes[motor];
                axis.target = match request.type_number {
                    0 => request.value,
                    1 => axis.target.wrapping_add(request.value),
                    _ => return (Status::WrongType, 0),
                };
                axis.moving = !self.stuck;
                (Status::Success, 0)
            }
            Command::SetAxisParameter => {
                if request.type_number == AxisParameter::ActualPosition.number() {
                    self.axes[motor].position = request.value;
                    self.axes[motor].target = request.value;
                }
                self.parameters.insert((request.motor_bank, request.type_number), request.value);
                (Status::Success, 0)
            }
            Command::GetAxisParameter => {
                let value = if request.type_number == AxisParameter::ActualPosition.number() {
                    self.advance(motor)
                } else if request.type_number == AxisParameter::PositionReached.number() {
                    let axis = self.axes[motor];
                    (axis.position == axis.target) as i32
                } else {
                    self.parameters
                        .get(&(request.motor_bank, request.type_number))
                        .copied()
                        .unwrap_or(0)
                };
                (Status::Success, value)
            }
        }
    }

    fn advance(&mut self, motor: usize) -> i32 {
        let axis = &mut self.axes[motor];
        let before = axis.position;
        if axis.moving {
            let remaining = axis.target as i64 - axis.position as i64;
            let step = remaining.clamp(-(TRAVEL_PER_READ as i64), TRAVEL_PER_READ as i64);
            axis.position = (axis.position as i64 + step) as i32;
            if axis.position == axis.target {
                axis.moving = false;
            }
        }
        before
    }

    fn respond(&mut self, frame: [u8; FRAME_LEN]) {
        let request = match Request::decode(&frame) {
            Ok(request) => request,
            Err(_) => {
                self.reply(frame[1], Status::WrongChecksum, 0);
                return;
            }
        };
        self.requests.push(request);
        let (status, value) = self.execute(request);
        self.reply(request.command, status, value);
    }

    fn reply(&mut self, command: u8, status: Status, value: i32) {
        let mut frame = Reply {
            reply_address: HOST_ADDRESS,
            module_address: self.module_address,
            status,
            command,
            value,
        }
        .encode();
        if self.corrupt_next {
            self.corrupt_next = false;
            frame[FRAME_LEN - 1] ^= 0xFF;
        }
        self.tx.extend(frame);
    }
}

impl embedded_io::ErrorType for SimBoard {
    type Error = embedded_io::ErrorKind;
}

impl embedded_io::Read for SimBoard {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut n = 0;
        while n < buf.len() {
            match self.tx.pop_front() {
                Some(byte) => {
                    buf[n] = byte;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }
}

impl embedded_io::Write for SimBoard {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        for &byte in buf {
            self.rx.push(byte);
            if self.rx.len() == FRAME_LEN {
                let mut frame = [0u8; FRAME_LEN];
                frame.copy_from_slice(&self.rx);
                self.rx.clear();
                self.respond(frame);
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Delay that records requested milliseconds instead of sleeping.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub calls_ms: Vec<u32>,
}

impl RecordingDelay {
    pub fn total_ms(&self) -> u64 {
        self.calls_ms.iter().map(|&ms| ms as u64).sum()
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls_ms.push(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls_ms.push(ms);
    }
}
