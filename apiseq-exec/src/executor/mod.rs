pub mod browser;
mod compare;
pub mod conditions;
pub mod context;
pub mod criteria;
pub mod eval;
pub mod events;
pub mod http;
pub mod input;
mod log;
pub mod merge;
mod result;
mod runner;
mod types;
mod worker;

pub use browser::{BrowserError, BrowserLauncher, NoOpBrowserLauncher, SystemBrowserLauncher};
pub use compare::{loose_number, loose_string, parse_leading_float};
pub use conditions::{evaluate, evaluate_all, ConditionOutcome, GateDecision};
pub use context::{ExecutionContext, StoredResponse, UserInput};
pub use criteria::{validate, ValidationFailure, ValidationResult};
pub use eval::{Scope, SubstitutionError, SubstitutionRecord, Substituter};
pub use events::{CompositeEventSink, Event, EventSink, NoOpEventSink, StdoutEventSink};
pub use http::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient,
    DEFAULT_MAX_RESPONSE_BYTES,
};
pub use input::{
    ChannelInputCollector, InputCollector, InputError, InputRequest, StaticInputCollector,
    StdinInputCollector,
};
pub use log::{ExecutionLogEntry, ResponseLog, StepStatus};
pub use merge::{merge, EffectiveNode, ValidationPolicy};
pub use result::{SequenceResult, StepError};
pub use runner::{Executor, START_OFFSET_REASON};
pub use types::{ExecutorConfig, RunOptions};
