//! Fatal, unrecoverable conditions.
//!
//! System errors are always [`Severity::Critical`](crate::Severity::Critical)
//! and always carry the `SYSTEM_ERROR` code; no factory lets a caller lower
//! either.

use crate::types::exception::Payload;
use crate::types::Exception;
use serde::{Deserialize, Serialize};

const ERROR_TYPE: &str = "errorType";
const DEFAULT_MESSAGE: &str = "System error occurred";

/// The fatal condition behind a system error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemCondition {
    OutOfMemory,
    StackOverflow,
    ThreadDeath,
    ClassLoading,
    Other,
}

/// Process memory figures captured when memory ran out, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorySnapshot {
    pub total_memory: u64,
    pub free_memory: u64,
    pub max_memory: u64,
}

impl Exception {
    /// Generic system error. An empty message becomes `System error occurred`.
    pub fn system(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.is_empty() { DEFAULT_MESSAGE.to_string() } else { message };
        Self::compose(Payload::System(SystemCondition::Other), None, message)
    }

    pub fn out_of_memory(component: impl Into<String>, memory_requested: u64) -> Self {
        let component = component.into();
        let err = Self::compose(
            Payload::System(SystemCondition::OutOfMemory),
            None,
            format!("Out of memory in {component} while requesting {memory_requested} bytes"),
        );
        err.context().insert_data("component", component);
        err.context().insert_data("memoryRequested", memory_requested);
        err.context().insert_metadata(ERROR_TYPE, "memory");
        err
    }

    /// Out-of-memory error carrying the process memory figures.
    pub fn out_of_memory_with_snapshot(snapshot: MemorySnapshot) -> Self {
        let err = Self::compose(
            Payload::System(SystemCondition::OutOfMemory),
            None,
            format!(
                "Out of memory: {} of {} bytes free (max {})",
                snapshot.free_memory, snapshot.total_memory, snapshot.max_memory
            ),
        );
        err.context().insert_data("totalMemory", snapshot.total_memory);
        err.context().insert_data("freeMemory", snapshot.free_memory);
        err.context().insert_data("maxMemory", snapshot.max_memory);
        err.context().insert_metadata(ERROR_TYPE, "memory");
        err
    }

    pub fn stack_overflow(method_name: impl Into<String>, stack_depth: u32) -> Self {
        let method_name = method_name.into();
        let err = Self::compose(
            Payload::System(SystemCondition::StackOverflow),
            None,
            format!("Stack overflow in {method_name} at depth {stack_depth}"),
        );
        err.context().insert_data("methodName", method_name);
        err.context().insert_data("stackDepth", stack_depth);
        err.context().insert_metadata(ERROR_TYPE, "stack");
        err
    }

    pub fn thread_death(thread_name: impl Into<String>) -> Self {
        let thread_name = thread_name.into();
        let err = Self::compose(
            Payload::System(SystemCondition::ThreadDeath),
            None,
            format!("Thread death: {thread_name}"),
        );
        err.context().insert_data("threadName", thread_name);
        err.context().insert_metadata(ERROR_TYPE, "thread");
        err
    }

    pub fn class_loading(class_name: impl Into<String>) -> Self {
        let class_name = class_name.into();
        let err = Self::compose(
            Payload::System(SystemCondition::ClassLoading),
            None,
            format!("Class loading error: {class_name}"),
        );
        err.context().insert_data("className", class_name);
        err.context().insert_metadata(ERROR_TYPE, "classloading");
        err
    }

    /// Condition behind a system error; `None` for other kinds.
    pub fn system_condition(&self) -> Option<SystemCondition> {
        match self.payload() {
            Payload::System(condition) => Some(*condition),
            _ => None,
        }
    }
}
