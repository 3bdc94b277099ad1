//! Sequences extraction, merging, synthesis and rendering for one profile
//! pair.
//!
//! The controller owns both profiles and the current report. Its methods take
//! `&self`: the session lock is held only for short critical sections and
//! never across an external call, so a caller can keep editing profiles while
//! an extraction or synthesis is outstanding. At most one call of each kind may
//! be in flight.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::capability::{Extractor, Synthesizer};
use crate::error::{IntelBriefError, Result};
use crate::export::ExportDocument;
use crate::extraction::ExtractionClient;
use crate::merge::merge_extraction;
use crate::profile::{BuyerProfile, SellerProfile};
use crate::render::{AnnotationRenderer, Document};
use crate::synthesis::{ReportSynthesizer, SynthesizedReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Fetch,
    Analyze,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Fetch => write!(f, "Profile extraction"),
            Operation::Analyze => write!(f, "Report synthesis"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineState {
    /// No report yet.
    Idle,
    Fetching,
    Analyzing,
    /// A report is available.
    Ready,
    /// The last completed operation failed; profiles and report are as they
    /// were before it.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineFailure {
    pub operation: Operation,
    pub message: String,
}

/// What a successful fetch changed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FetchOutcome {
    pub seller_updated: bool,
    pub buyer_updated: bool,
    /// Advisory only.
    pub confidence: Option<f64>,
}

#[derive(Debug, Default)]
struct Session {
    seller: SellerProfile,
    buyer: BuyerProfile,
    report: Option<SynthesizedReport>,
    fetching: bool,
    analyzing: bool,
    last_failure: Option<PipelineFailure>,
}

impl Session {
    fn state(&self) -> PipelineState {
        if self.analyzing {
            PipelineState::Analyzing
        } else if self.fetching {
            PipelineState::Fetching
        } else if self.last_failure.is_some() {
            PipelineState::Error
        } else if self.report.is_some() {
            PipelineState::Ready
        } else {
            PipelineState::Idle
        }
    }

    fn reference_urls(&self) -> Vec<String> {
        let mut urls = self.seller.reference_urls();
        urls.extend(self.buyer.reference_urls());
        urls
    }

    fn in_flight(&mut self, operation: Operation) -> &mut bool {
        match operation {
            Operation::Fetch => &mut self.fetching,
            Operation::Analyze => &mut self.analyzing,
        }
    }
}

fn lock(session: &Mutex<Session>) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the in-flight flag for an operation when dropped, including when
/// the caller abandons the future mid-call.
struct InFlight<'a> {
    session: &'a Mutex<Session>,
    operation: Operation,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *lock(self.session).in_flight(self.operation) = false;
    }
}

pub struct PipelineController<E, S> {
    extraction: ExtractionClient<E>,
    synthesis: ReportSynthesizer<S>,
    renderer: AnnotationRenderer,
    session: Mutex<Session>,
}

impl<E: Extractor, S: Synthesizer> PipelineController<E, S> {
    pub fn new(extractor: E, synthesizer: S) -> Self {
        Self {
            extraction: ExtractionClient::new(extractor),
            synthesis: ReportSynthesizer::new(synthesizer),
            renderer: AnnotationRenderer::new(),
            session: Mutex::new(Session::default()),
        }
    }

    pub fn extractor(&self) -> &E {
        self.extraction.extractor()
    }

    pub fn synthesizer(&self) -> &S {
        self.synthesis.synthesizer()
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        lock(&self.session)
    }

    /// Marks `operation` as in flight, or reports it as busy.
    fn begin(&self, session: &mut Session, operation: Operation) -> Result<InFlight<'_>> {
        let flag = session.in_flight(operation);
        if *flag {
            warn!("{} requested while one is already running", operation);
            return Err(IntelBriefError::Busy(operation));
        }
        *flag = true;
        Ok(InFlight {
            session: &self.session,
            operation,
        })
    }

    pub fn state(&self) -> PipelineState {
        self.session().state()
    }

    pub fn seller(&self) -> SellerProfile {
        self.session().seller.clone()
    }

    pub fn buyer(&self) -> BuyerProfile {
        self.session().buyer.clone()
    }

    pub fn set_seller(&self, seller: SellerProfile) {
        self.session().seller = seller;
    }

    pub fn set_buyer(&self, buyer: BuyerProfile) {
        self.session().buyer = buyer;
    }

    /// Applies a user edit to the seller record.
    pub fn update_seller(&self, edit: impl FnOnce(&mut SellerProfile)) {
        edit(&mut self.session().seller);
    }

    pub fn update_buyer(&self, edit: impl FnOnce(&mut BuyerProfile)) {
        edit(&mut self.session().buyer);
    }

    /// Seller LinkedIn, seller website, buyer LinkedIn, buyer website, with
    /// blanks skipped.
    pub fn reference_urls(&self) -> Vec<String> {
        self.session().reference_urls()
    }

    pub fn can_fetch(&self) -> bool {
        let session = self.session();
        !session.fetching && !session.reference_urls().is_empty()
    }

    pub fn can_analyze(&self) -> bool {
        let session = self.session();
        !session.analyzing && session.seller.has_name() && session.buyer.has_name()
    }

    pub fn report(&self) -> Option<SynthesizedReport> {
        self.session().report.clone()
    }

    pub fn last_failure(&self) -> Option<PipelineFailure> {
        self.session().last_failure.clone()
    }

    /// Renders the current report. Recomputed on every call.
    pub fn render_report(&self) -> Option<Document> {
        let report = self.report()?;
        Some(self.renderer.render_report(&report))
    }

    /// Export payload for the current report; `None` until one exists.
    pub fn export(&self) -> Option<ExportDocument> {
        let document = self.render_report()?;
        Some(ExportDocument::new(&self.buyer(), &document))
    }

    /// Enriches both profiles from their reference URLs. On failure the
    /// profiles are left exactly as they were.
    pub async fn fetch(&self) -> Result<FetchOutcome> {
        let (urls, _in_flight) = {
            let mut session = self.session();
            let urls = session.reference_urls();
            if urls.is_empty() {
                return Err(IntelBriefError::ValidationGate(
                    "enter a LinkedIn URL or website for the seller or buyer first".to_string(),
                ));
            }
            let guard = self.begin(&mut session, Operation::Fetch)?;
            (urls, guard)
        };

        let outcome = self.extraction.extract(&urls).await;

        let mut session = self.session();
        match outcome {
            Ok(result) => {
                let (seller, buyer) = merge_extraction(&session.seller, &session.buyer, &result);
                session.seller = seller;
                session.buyer = buyer;
                session.last_failure = None;
                info!(
                    "Profiles enriched (seller: {}, buyer: {})",
                    result.seller.is_some(),
                    result.buyer.is_some()
                );
                Ok(FetchOutcome {
                    seller_updated: result.seller.is_some(),
                    buyer_updated: result.buyer.is_some(),
                    confidence: result.confidence,
                })
            }
            Err(err) => {
                error!("Fetch error: {}", err);
                session.last_failure = Some(PipelineFailure {
                    operation: Operation::Fetch,
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Synthesizes a new report from a snapshot of the current profiles. On
    /// failure any earlier report is kept.
    pub async fn analyze(&self) -> Result<SynthesizedReport> {
        let (seller, buyer, _in_flight) = {
            let mut session = self.session();
            if !session.seller.has_name() || !session.buyer.has_name() {
                return Err(IntelBriefError::ValidationGate(
                    "both seller and buyer need a name before analysis".to_string(),
                ));
            }
            let guard = self.begin(&mut session, Operation::Analyze)?;
            (session.seller.clone(), session.buyer.clone(), guard)
        };

        let outcome = self.synthesis.synthesize(&seller, &buyer).await;

        let mut session = self.session();
        match outcome {
            Ok(report) => {
                session.report = Some(report.clone());
                session.last_failure = None;
                info!("Report ready ({} chars)", report.markdown().len());
                Ok(report)
            }
            Err(err) => {
                error!("Analysis error: {}", err);
                session.last_failure = Some(PipelineFailure {
                    operation: Operation::Analyze,
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }
}
