//! Result Set
//!
//! Accumulates samples for a single run, grouped by browser and then suite.
//! Groups keep the order in which they were first seen so text output is
//! deterministic; ranking happens later.

use crate::sample::BenchmarkSample;

/// Per-run accumulator: browser → suite → samples
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    browsers: Vec<BrowserResults>,
}

/// All suites reported by one browser
#[derive(Debug, Clone)]
pub struct BrowserResults {
    /// Browser name
    pub browser: String,
    /// Suites in first-seen order
    pub suites: Vec<SuiteResults>,
}

/// Samples of one suite within one browser
#[derive(Debug, Clone)]
pub struct SuiteResults {
    /// Suite name
    pub suite: String,
    /// Samples in ingestion order
    pub samples: Vec<BenchmarkSample>,
}

/// Borrowed view of a (browser, suite) group
#[derive(Debug, Clone, Copy)]
pub struct Group<'a> {
    /// Browser name
    pub browser: &'a str,
    /// Suite name
    pub suite: &'a str,
    /// Samples in ingestion order
    pub samples: &'a [BenchmarkSample],
}

impl ResultSet {
    /// Create an empty result set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample under `browser` and the sample's suite.
    pub fn ingest(&mut self, browser: &str, sample: BenchmarkSample) {
        let browser_idx = match self.browsers.iter().position(|b| b.browser == browser) {
            Some(idx) => idx,
            None => {
                self.browsers.push(BrowserResults {
                    browser: browser.to_string(),
                    suites: Vec::new(),
                });
                self.browsers.len() - 1
            }
        };

        let suites = &mut self.browsers[browser_idx].suites;
        match suites.iter_mut().find(|s| s.suite == sample.suite) {
            Some(suite) => suite.samples.push(sample),
            None => suites.push(SuiteResults {
                suite: sample.suite.clone(),
                samples: vec![sample],
            }),
        }
    }

    /// Keep only the samples for which `keep(browser, sample)` returns true.
    ///
    /// Samples are visited in ingestion order. Suites and browsers left without
    /// samples are dropped.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &BenchmarkSample) -> bool,
    {
        for browser in &mut self.browsers {
            for suite in &mut browser.suites {
                suite.samples.retain(|sample| keep(&browser.browser, sample));
            }
            browser.suites.retain(|suite| !suite.samples.is_empty());
        }
        self.browsers.retain(|browser| !browser.suites.is_empty());
    }

    /// Browsers in first-seen order
    pub fn browsers(&self) -> &[BrowserResults] {
        &self.browsers
    }

    /// Iterate over (browser, suite) groups, browser-major
    pub fn groups(&self) -> impl Iterator<Item = Group<'_>> {
        self.browsers.iter().flat_map(|b| {
            b.suites.iter().map(move |s| Group {
                browser: &b.browser,
                suite: &s.suite,
                samples: &s.samples,
            })
        })
    }

    /// Total number of ingested samples
    pub fn len(&self) -> usize {
        self.groups().map(|g| g.samples.len()).sum()
    }

    /// Whether nothing has been ingested
    pub fn is_empty(&self) -> bool {
        self.browsers.is_empty()
    }
}
