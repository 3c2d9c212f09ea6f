//! Effects - side effects declared by the reducer

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch summaries for ids 1..=limit
    FetchDex { limit: u16 },
    /// Fetch one detail record
    FetchDetail { id: u16 },
    /// Start the deferred selected-detail clear after a modal close
    ScheduleModalClear,
}
