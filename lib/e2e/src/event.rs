use alloy::{rpc::types::eth::TransactionReceipt, sol_types::SolEvent};

/// Extension trait for inspecting the events of a mined transaction.
pub trait Ext {
    /// All events of type `E` in the receipt, in log order.
    fn emitted<E: SolEvent>(&self) -> Vec<E>;

    /// Asserts the receipt contains an event equal to `expected`.
    fn emits<E: SolEvent + PartialEq>(&self, expected: &E) -> bool {
        self.emitted::<E>().iter().any(|event| event == expected)
    }
}

impl Ext for TransactionReceipt {
    fn emitted<E: SolEvent>(&self) -> Vec<E> {
        // Logs of other event types fail to decode and are skipped.
        self.inner
            .logs()
            .iter()
            .filter_map(|log| log.log_decode::<E>().ok())
            .map(|log| log.inner.data)
            .collect()
    }
}
