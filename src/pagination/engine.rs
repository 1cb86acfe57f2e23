//! Pagination engine
//!
//! Drives the fetch-more loop for one query and merges every page into a
//! single accumulated record sequence.
//!
//! Execution flow (strict order):
//! 1. Count-only query: return the first page's size, touch no records
//! 2. First page without a records field: empty result
//! 3. Decode the first page (a bare record becomes a one-element sequence)
//! 4. Remember the total size and the next locator
//! 5. While the policy allows and the last page is not done:
//!    a. consult the memory guard; stop with a partial result if it trips
//!    b. fetch the next page with the retained locator
//!    c. decode it and append its records
//! 6. Return records, size, status and elapsed time
//!
//! A failed fetch or a malformed page ends the run with an error carrying
//! the records accumulated so far.
//!
//! The guard is not consulted before the first page, so one oversized first
//! page is never caught.

use super::errors::{PaginationError, PaginationResult};
use super::page::Page;
use super::request::QueryRequest;
use super::result::{AccumulatedResult, PaginationOutcome, PaginationStatus};
use super::stream::{PageSource, PageStream};
use crate::config::PagerConfig;
use crate::memory::{GuardReading, MemoryGuard, MemoryProbe};
use crate::observability::{log_event_with_fields, Event, Timer};

/// Drains locator-paged results from a page source
///
/// Each engine run owns its accumulation buffer, locator and guard checks;
/// nothing is shared between runs.
pub struct PaginationEngine<S: PageSource, P: MemoryProbe> {
    source: S,
    guard: MemoryGuard<P>,
    auto_continue: bool,
}

impl<S: PageSource, P: MemoryProbe> PaginationEngine<S, P> {
    pub fn new(source: S, guard: MemoryGuard<P>, auto_continue: bool) -> Self {
        Self {
            source,
            guard,
            auto_continue,
        }
    }

    /// Build an engine from configuration
    pub fn from_config(source: S, probe: P, config: &PagerConfig) -> Self {
        Self::new(
            source,
            MemoryGuard::new(probe, config.memory_threshold()),
            config.auto_continue_enabled(),
        )
    }

    /// Fetch the first page and drain the result.
    ///
    /// Elapsed time is measured from before the first fetch.
    pub fn execute(&mut self, request: &QueryRequest) -> PaginationResult<PaginationOutcome> {
        let timer = Timer::new();
        let first_page = match self.source.fetch_page(request.query(), None) {
            Ok(page) => page,
            Err(source) => {
                log_event_with_fields(Event::TransportFailed, &[("reason", source.message())]);
                return Err(PaginationError::Transport {
                    source,
                    partial: AccumulatedResult::Empty,
                });
            }
        };
        self.drain_from(request, first_page, timer)
    }

    /// Drain a result whose first page the caller already fetched
    pub fn drain(&mut self, request: &QueryRequest, first_page: Page) -> PaginationResult<PaginationOutcome> {
        self.drain_from(request, first_page, Timer::new())
    }

    fn drain_from(
        &mut self,
        request: &QueryRequest,
        first_page: Page,
        timer: Timer,
    ) -> PaginationResult<PaginationOutcome> {
        log_event_with_fields(
            Event::PaginationStart,
            &[("query", request.query()), ("size", &first_page.size.to_string())],
        );

        // Step 1: count short-circuit
        if request.is_count_only() {
            return Ok(self.finish(
                AccumulatedResult::Count(first_page.size),
                PaginationStatus::Complete,
                first_page.done,
                1,
                timer,
            ));
        }

        // Step 2: no records field at all
        if !first_page.has_records_field() {
            return Ok(self.finish(
                AccumulatedResult::Empty,
                PaginationStatus::Complete,
                first_page.done,
                1,
                timer,
            ));
        }

        // Steps 3-4
        let total_size = first_page.size;
        let may_continue = self.auto_continue || request.suppresses_screen_output();
        let mut stream = PageStream::resume_from(&mut self.source, request.query(), first_page);
        let mut records = Vec::new();
        let mut capacity_hit = None;

        // Step 5
        loop {
            let is_first = stream.pages_fetched() == 0;
            if !is_first {
                if !may_continue || stream.is_done() {
                    break;
                }

                // 5a
                if let GuardReading::Exceeded { usage_bytes, ratio } = self.guard.check() {
                    log_event_with_fields(
                        Event::MemoryGuardTripped,
                        &[
                            ("rows", &records.len().to_string()),
                            ("usage_bytes", &usage_bytes.to_string()),
                            ("ratio", &format!("{:.3}", ratio)),
                        ],
                    );
                    capacity_hit = Some(PaginationStatus::CapacityExceeded {
                        rows_so_far: records.len(),
                        usage_bytes,
                        ratio,
                    });
                    break;
                }
            }

            // 5b
            let requested_with = stream.next_locator().cloned();
            let page = match stream.next_page() {
                Ok(Some(page)) => page,
                Ok(None) => break,
                Err(source) => {
                    log_event_with_fields(
                        Event::TransportFailed,
                        &[("reason", source.message()), ("rows", &records.len().to_string())],
                    );
                    let locator = stream.next_locator().cloned();
                    return Err(PaginationError::Transport {
                        source,
                        partial: AccumulatedResult::from_records(records, total_size, locator),
                    });
                }
            };

            // 5c
            let page_records = match page.decode_records() {
                Ok(page_records) => page_records,
                Err(source) => {
                    log_event_with_fields(
                        Event::PageMalformed,
                        &[("reason", &source.to_string()), ("rows", &records.len().to_string())],
                    );
                    return Err(PaginationError::Malformed {
                        source,
                        partial: AccumulatedResult::from_records(records, total_size, requested_with),
                    });
                }
            };
            log_event_with_fields(
                Event::PageFetched,
                &[
                    ("page", &stream.pages_fetched().to_string()),
                    ("rows", &page_records.len().to_string()),
                ],
            );
            records.extend(page_records);
        }

        let done = stream.is_done();
        let pages_fetched = stream.pages_fetched();
        let next_locator = stream.next_locator().cloned();

        let status = match capacity_hit {
            Some(status) => status,
            None if !done => PaginationStatus::MoreAvailable,
            None => PaginationStatus::Complete,
        };

        // Step 6
        Ok(self.finish(
            AccumulatedResult::from_records(records, total_size, next_locator),
            status,
            done,
            pages_fetched,
            timer,
        ))
    }

    fn finish(
        &self,
        result: AccumulatedResult,
        status: PaginationStatus,
        done: bool,
        pages_fetched: usize,
        timer: Timer,
    ) -> PaginationOutcome {
        let elapsed = timer.elapsed();

        log_event_with_fields(
            Event::PaginationComplete,
            &[
                ("rows", &result.len().to_string()),
                ("pages", &pages_fetched.to_string()),
                ("status", status.as_str()),
                ("elapsed_ms", &elapsed.as_millis().to_string()),
            ],
        );

        PaginationOutcome {
            result,
            status,
            done,
            pages_fetched,
            elapsed,
        }
    }
}
