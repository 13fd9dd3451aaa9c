//! Lock/idempotency tracker contract.
//!
//! Per `(class, day)` the tracker holds the set of roll numbers whose
//! notification decision has been made. The set only grows; there is no
//! unlock operation.

use std::collections::BTreeSet;
use std::future::Future;

use crate::attendance::ClassKey;
use crate::calendar::CalendarDay;
use crate::error::StorageError;
use crate::types::Roll;

pub trait LockTracker: Send + Sync {
    /// The finalized rolls for `(class, day)`; empty when none exist yet.
    fn get_locked(
        &self,
        class: &ClassKey,
        day: CalendarDay,
    ) -> impl Future<Output = Result<BTreeSet<Roll>, StorageError>> + Send;

    /// Merge `rolls` into the set as one atomic union.
    ///
    /// Returns the rolls that were newly added by this call. Rolls already
    /// present are ignored, so a concurrent caller that merged them first
    /// keeps ownership of their notification.
    fn add_locked(
        &self,
        class: &ClassKey,
        day: CalendarDay,
        rolls: &BTreeSet<Roll>,
    ) -> impl Future<Output = Result<BTreeSet<Roll>, StorageError>> + Send;
}
