//! Recording transfer fake
//!
//! A `FundsTransfer` implementation that records every call, settles or
//! refuses on demand, and can be shared between the test and the code
//! under test.

use std::sync::{Arc, Mutex};

use core_kernel::{FundsTransfer, Money, PartyId, PortError, TransferReceipt};

#[derive(Debug, Default)]
struct Recorded {
    calls: Vec<(PartyId, Money)>,
    receipts: Vec<TransferReceipt>,
    failing: bool,
}

/// Transfer port fake; clones share the same record
#[derive(Debug, Clone, Default)]
pub struct RecordingTransfer {
    inner: Arc<Mutex<Recorded>>,
}

impl RecordingTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fake that refuses every transfer until `set_failing(false)`
    pub fn failing() -> Self {
        let transfer = Self::new();
        transfer.set_failing(true);
        transfer
    }

    pub fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    /// Every attempted transfer, including refused ones
    pub fn calls(&self) -> Vec<(PartyId, Money)> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Receipts of the transfers that settled
    pub fn receipts(&self) -> Vec<TransferReceipt> {
        self.lock().receipts.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Recorded> {
        self.inner.lock().expect("recording transfer lock poisoned")
    }
}

impl FundsTransfer for RecordingTransfer {
    fn transfer(&mut self, payee: PartyId, amount: Money) -> Result<TransferReceipt, PortError> {
        let mut recorded = self.lock();
        recorded.calls.push((payee, amount));

        if recorded.failing {
            return Err(PortError::ServiceUnavailable {
                service: "recording-transfer".to_string(),
            });
        }

        let receipt = TransferReceipt::settled_now(payee, amount);
        recorded.receipts.push(receipt.clone());
        Ok(receipt)
    }
}
