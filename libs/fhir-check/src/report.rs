use crate::error::CheckError;

/// Outcome of one check case.
#[derive(Debug)]
pub struct CaseResult {
    pub name: &'static str,
    pub outcome: Result<(), CheckError>,
}

impl CaseResult {
    pub fn passed(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Per-case results of a full run, in execution order.
#[derive(Debug, Default)]
pub struct CheckReport {
    results: Vec<CaseResult>,
}

impl CheckReport {
    pub fn record(&mut self, name: &'static str, outcome: Result<(), CheckError>) {
        match &outcome {
            Ok(()) => tracing::info!(case = name, "Check passed"),
            Err(error) => tracing::error!(case = name, %error, "Check failed"),
        }
        self.results.push(CaseResult { name, outcome });
    }

    pub fn results(&self) -> &[CaseResult] {
        &self.results
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}
