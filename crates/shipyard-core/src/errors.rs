use shipyard_core_types::RunId;
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Pipeline stage an error was raised in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Plan,
    Sequence,
    Wiring,
    Ledger,
    Artifacts,
    Bundle,
    Selection,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Plan => "plan",
            Stage::Sequence => "sequence",
            Stage::Wiring => "wiring",
            Stage::Ledger => "ledger",
            Stage::Artifacts => "artifacts",
            Stage::Bundle => "bundle",
            Stage::Selection => "selection",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that scripts and tests can match on
/// without parsing the human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Deployment
    UnresolvedDependency,
    DeployFailure,
    WiringFailure,

    // Ledger
    LedgerCorrupt,

    // Artifacts / verification
    NoArtifactsFound,
    UnitNotCompiled,
    InvalidSnapshot,
    InvalidSelection,
    InvalidAddress,

    // Configuration
    InvalidPlan,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::UnresolvedDependency => "ERR_UNRESOLVED_DEPENDENCY",
            ExErrorKind::DeployFailure => "ERR_DEPLOY_FAILURE",
            ExErrorKind::WiringFailure => "ERR_WIRING_FAILURE",
            ExErrorKind::LedgerCorrupt => "ERR_LEDGER_CORRUPT",
            ExErrorKind::NoArtifactsFound => "ERR_NO_ARTIFACTS_FOUND",
            ExErrorKind::UnitNotCompiled => "ERR_UNIT_NOT_COMPILED",
            ExErrorKind::InvalidSnapshot => "ERR_INVALID_SNAPSHOT",
            ExErrorKind::InvalidSelection => "ERR_INVALID_SELECTION",
            ExErrorKind::InvalidAddress => "ERR_INVALID_ADDRESS",
            ExErrorKind::InvalidPlan => "ERR_INVALID_PLAN",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification (kind + stage) for programmatic handling and the
/// unit/method context an operator needs to reconcile partial progress.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    stage: Option<Stage>,
    op: Option<String>,
    unit: Option<String>,
    method: Option<String>,
    run_id: Option<RunId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            stage: None,
            op: None,
            unit: None,
            method: None,
            run_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add stage context
    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add unit name context
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Add setter method context
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Add run ID context
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn stage(&self) -> Option<Stage> {
        self.stage
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        match (&self.stage, &self.op) {
            (Some(stage), Some(op)) => write!(f, " {}/{}", stage, op)?,
            (Some(stage), None) => write!(f, " {}", stage)?,
            (None, Some(op)) => write!(f, " {}", op)?,
            (None, None) => {}
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(unit) = &self.unit {
            write!(f, " (unit: {})", unit)?;
        }
        if let Some(method) = &self.method {
            write!(f, " (method: {})", method)?;
        }
        if let Some(source) = &self.source {
            write!(f, "; caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for Shipyard operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShipyardError {
    /// A symbolic reference has no known address
    #[error("Unresolved reference {reference} required by {unit}")]
    UnresolvedDependency { unit: String, reference: String },

    /// The chain rejected or failed to confirm a deployment
    #[error("Deployment of {unit} failed: {reason}")]
    DeployFailure { unit: String, reason: String },

    /// The chain rejected or failed to confirm a setter call
    #[error("Wiring call {unit}.{method} failed: {reason}")]
    WiringFailure {
        unit: String,
        method: String,
        reason: String,
    },

    /// Ledger file exists but cannot be decoded
    #[error("Ledger {path} is corrupt: {reason}")]
    LedgerCorrupt { path: String, reason: String },

    /// No build snapshot files were found
    #[error("No build snapshots found in {dir}")]
    NoArtifactsFound { dir: String },

    /// The latest snapshot does not contain the requested unit
    #[error("Unit {unit} is not present in snapshot {snapshot}")]
    UnitNotCompiled { unit: String, snapshot: String },

    /// Snapshot exists but is not a usable build-info document
    #[error("Snapshot {path} is invalid: {reason}")]
    InvalidSnapshot { path: String, reason: String },

    /// Interactive menu answer is not one of the listed numbers
    #[error("Invalid selection '{input}': expected a number between 1 and {choices}")]
    InvalidSelection { input: String, choices: usize },

    /// Address does not have a valid format or checksum
    #[error("Invalid address '{input}': {reason}")]
    InvalidAddress { input: String, reason: String },

    /// Deploy plan failed validation
    #[error("Invalid deploy plan: {reason}")]
    InvalidPlan { reason: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<ShipyardError> for ExError {
    fn from(err: ShipyardError) -> Self {
        let message = err.to_string();
        match err {
            ShipyardError::UnresolvedDependency { unit, .. } => {
                ExError::new(ExErrorKind::UnresolvedDependency)
                    .with_unit(unit)
                    .with_message(message)
            }
            ShipyardError::DeployFailure { unit, .. } => ExError::new(ExErrorKind::DeployFailure)
                .with_stage(Stage::Sequence)
                .with_unit(unit)
                .with_message(message),
            ShipyardError::WiringFailure { unit, method, .. } => {
                ExError::new(ExErrorKind::WiringFailure)
                    .with_stage(Stage::Wiring)
                    .with_unit(unit)
                    .with_method(method)
                    .with_message(message)
            }
            ShipyardError::LedgerCorrupt { .. } => ExError::new(ExErrorKind::LedgerCorrupt)
                .with_stage(Stage::Ledger)
                .with_message(message),
            ShipyardError::NoArtifactsFound { .. } => ExError::new(ExErrorKind::NoArtifactsFound)
                .with_stage(Stage::Artifacts)
                .with_message(message),
            ShipyardError::UnitNotCompiled { unit, .. } => {
                ExError::new(ExErrorKind::UnitNotCompiled)
                    .with_stage(Stage::Artifacts)
                    .with_unit(unit)
                    .with_message(message)
            }
            ShipyardError::InvalidSnapshot { .. } => ExError::new(ExErrorKind::InvalidSnapshot)
                .with_stage(Stage::Artifacts)
                .with_message(message),
            ShipyardError::InvalidSelection { .. } => ExError::new(ExErrorKind::InvalidSelection)
                .with_stage(Stage::Selection)
                .with_message(message),
            ShipyardError::InvalidAddress { .. } => {
                ExError::new(ExErrorKind::InvalidAddress).with_message(message)
            }
            ShipyardError::InvalidPlan { .. } => ExError::new(ExErrorKind::InvalidPlan)
                .with_stage(Stage::Plan)
                .with_message(message),
            ShipyardError::Internal { .. } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}
