/// Optional bounds on the slice of comments fetched for a topic.
///
/// `None` and zero are treated alike: the parameter is left out of the
/// request and the service applies its default (no limit, no offset).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryWindow {
    pub take: Option<u32>,
    pub skip: Option<u32>,
}

impl QueryWindow {
    pub fn new(take: Option<u32>, skip: Option<u32>) -> Self {
        Self { take, skip }
    }

    #[inline]
    pub fn with_take(mut self, take: u32) -> Self {
        self.take = Some(take);
        self
    }

    #[inline]
    pub fn with_skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    #[inline]
    pub fn effective_take(&self) -> Option<u32> {
        self.take.filter(|&n| n > 0)
    }

    #[inline]
    pub fn effective_skip(&self) -> Option<u32> {
        self.skip.filter(|&n| n > 0)
    }

    /// Query parameters for the present bounds, `skip` before `take`.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(skip) = self.effective_skip() {
            params.push(("skip", skip.to_string()));
        }
        if let Some(take) = self.effective_take() {
            params.push(("take", take.to_string()));
        }
        params
    }
}
