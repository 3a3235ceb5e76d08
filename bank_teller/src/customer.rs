/// One fully resolved customer.
///
/// All times are simulation minutes. A customer is created and resolved
/// in the minute it arrives: the assigned teller and the service window
/// are decided immediately, so `finish_time` may land past the end of
/// the simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Customer {
    pub arrival_time: usize,
    pub served_time: usize,
    pub finish_time: usize,
    /// Index of the assigned teller in the pool.
    pub server: usize,
}

impl Customer {
    /// Minutes spent queueing before service began.
    pub fn wait_time(&self) -> usize {
        self.served_time - self.arrival_time
    }

    /// Minutes spent being served.
    pub fn service_time(&self) -> usize {
        self.finish_time - self.served_time
    }

    /// Minutes from walking in to walking out.
    pub fn spent_time(&self) -> usize {
        self.finish_time - self.arrival_time
    }
}
