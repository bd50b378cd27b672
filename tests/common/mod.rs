#![allow(dead_code)]

//! Register-file bus double shared by the integration tests.

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation, SevenBitAddress};

/// In-memory I2C device: write transactions land in a register file and an
/// ordered `(register, value)` log, reads answer from the same file.
///
/// Clones share state, so a test can keep one handle for inspection while
/// the driver owns another.
#[derive(Clone)]
pub struct MockBus {
    state: Rc<RefCell<BusState>>,
}

struct BusState {
    regs: [u8; 0x40],
    writes: Vec<(u8, u8)>,
    fail: bool,
}

impl MockBus {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(BusState {
                regs: [0; 0x40],
                writes: Vec::new(),
                fail: false,
            })),
        }
    }

    /// Current value of one register.
    pub fn reg(&self, register: u8) -> u8 {
        self.state.borrow().regs[register as usize]
    }

    /// Seed one register without logging a write.
    pub fn set_reg(&self, register: u8, value: u8) {
        self.state.borrow_mut().regs[register as usize] = value;
    }

    /// Snapshot of the whole register file.
    pub fn regs(&self) -> [u8; 0x40] {
        self.state.borrow().regs
    }

    /// Every `(register, value)` write so far, in bus order.
    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.state.borrow().writes.clone()
    }

    /// The values written to one register, in bus order.
    pub fn writes_to(&self, register: u8) -> Vec<u8> {
        self.state
            .borrow()
            .writes
            .iter()
            .filter(|(reg, _)| *reg == register)
            .map(|(_, value)| *value)
            .collect()
    }

    pub fn write_count(&self) -> usize {
        self.state.borrow().writes.len()
    }

    pub fn clear_writes(&self) {
        self.state.borrow_mut().writes.clear();
    }

    /// Make every following transaction fail.
    pub fn set_fail(&self, fail: bool) {
        self.state.borrow_mut().fail = fail;
    }
}

impl ErrorType for MockBus {
    type Error = ErrorKind;
}

impl I2c for MockBus {
    fn transaction(
        &mut self,
        _address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if state.fail {
            return Err(ErrorKind::Other);
        }
        let mut selected = None;
        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    let register = bytes[0];
                    for value in &bytes[1..] {
                        state.regs[register as usize] = *value;
                        state.writes.push((register, *value));
                    }
                    selected = Some(register);
                }
                Operation::Read(buffer) => {
                    let register = selected.expect("read without a register select") as usize;
                    for (offset, slot) in buffer.iter_mut().enumerate() {
                        *slot = state.regs[register + offset];
                    }
                }
            }
        }
        Ok(())
    }
}
