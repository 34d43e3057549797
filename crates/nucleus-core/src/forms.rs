//! Contact and job-application forms.
//!
//! Submission validates the form, builds the mail template parameters and hands them to a
//! [`Mailer`]. Only one submission may be in flight per [`FormSubmitter`]; a second call while the
//! first is pending is rejected with [`FormError::InFlight`].

use crate::catalog::DataProvider;
use crate::config::SiteConfig;
use crate::model::Job;
use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use std::future::Future;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

const MIB: u64 = 1024 * 1024;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOC: &str = "application/msword";
pub const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Company selector value meaning "no particular company".
pub const GENERAL_INQUIRY: &str = "general";

const NOT_PROVIDED: &str = "Not provided";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Please fill in the required field: {field}")]
    MissingField { field: &'static str },

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("File size must be less than {}", fmt_size_limit(*.limit))]
    ResumeTooLarge { size: u64, limit: u64 },

    #[error("Please upload a PDF or Word document")]
    UnsupportedResumeType { mime: String },

    #[error("A submission is already in progress")]
    InFlight,

    #[error("Delivery failed: {message}")]
    Delivery { message: String },
}

/// `5MB`, `512KB`, `100 bytes`.
pub fn fmt_size_limit(bytes: u64) -> String {
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= 1024 && bytes % 1024 == 0 {
        format!("{}KB", bytes / 1024)
    } else {
        format!("{bytes} bytes")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Contact,
    Application,
}

impl FormKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Application => "application",
        }
    }

    fn success_message(self) -> &'static str {
        match self {
            Self::Contact => "Message sent successfully! We'll get back to you soon.",
            Self::Application => "Application submitted successfully!",
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            Self::Contact => "Failed to send message. Please try again.",
            Self::Application => "Failed to submit application. Please try again.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(kind: FormKind) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: kind.success_message().to_string(),
        }
    }

    /// Validation problems are shown as-is; delivery problems get the generic retry message.
    pub fn from_error(kind: FormKind, err: &FormError) -> Self {
        let message = match err {
            FormError::Delivery { .. } => kind.failure_message().to_string(),
            other => other.to_string(),
        };
        Self {
            level: NoticeLevel::Error,
            message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumeAttachment {
    pub file_name: String,
    pub size: u64,
    pub mime: String,
}

impl ResumeAttachment {
    pub fn new(file_name: impl Into<String>, size: u64, mime: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            size,
            mime: mime.into(),
        }
    }

    /// Builds an attachment whose MIME type is guessed from the file extension. Unknown
    /// extensions get `application/octet-stream`, which the upload policy rejects.
    pub fn guess(file_name: impl Into<String>, size: u64) -> Self {
        let file_name = file_name.into();
        let ext = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        let mime = match ext.as_str() {
            "pdf" => MIME_PDF,
            "doc" => MIME_DOC,
            "docx" => MIME_DOCX,
            _ => "application/octet-stream",
        };
        Self::new(file_name, size, mime)
    }

    fn attached_label(attachment: Option<&Self>) -> String {
        match attachment {
            Some(a) => format!("Yes - {}", a.file_name),
            None => "No".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_bytes: u64,
    pub allowed_types: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: 5 * MIB,
            allowed_types: vec![MIME_PDF.into(), MIME_DOC.into(), MIME_DOCX.into()],
        }
    }
}

impl UploadPolicy {
    pub fn from_config(cfg: &SiteConfig) -> Self {
        let defaults = Self::default();
        Self {
            max_bytes: cfg.get_u64("uploads.maxBytes").unwrap_or(defaults.max_bytes),
            allowed_types: cfg
                .get_str_list("uploads.allowedTypes")
                .filter(|types| !types.is_empty())
                .unwrap_or(defaults.allowed_types),
        }
    }

    /// Size is checked before type.
    pub fn check(&self, attachment: &ResumeAttachment) -> Result<(), FormError> {
        if attachment.size > self.max_bytes {
            return Err(FormError::ResumeTooLarge {
                size: attachment.size,
                limit: self.max_bytes,
            });
        }
        if !self.allowed_types.iter().any(|t| t == &attachment.mime) {
            return Err(FormError::UnsupportedResumeType {
                mime: attachment.mime.clone(),
            });
        }
        Ok(())
    }
}

/// Ordered template parameters handed to the mailer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TemplateParams(IndexMap<String, String>);

impl TemplateParams {
    fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn required(field: &'static str, value: &str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        return Err(FormError::MissingField { field });
    }
    Ok(())
}

fn check_email(value: &str) -> Result<(), FormError> {
    required("email", value)?;
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));
    if !re.is_match(value.trim()) {
        return Err(FormError::InvalidEmail);
    }
    Ok(())
}

fn or_not_provided(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(NOT_PROVIDED)
        .to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Company id, [`GENERAL_INQUIRY`], or empty.
    pub company: String,
    pub subject: String,
    pub message: String,
    #[serde(skip)]
    pub resume: Option<ResumeAttachment>,
}

impl ContactForm {
    pub fn validate(&self, policy: &UploadPolicy) -> Result<(), FormError> {
        required("name", &self.name)?;
        check_email(&self.email)?;
        required("subject", &self.subject)?;
        required("message", &self.message)?;
        if let Some(resume) = &self.resume {
            policy.check(resume)?;
        }
        Ok(())
    }

    /// Company display name for the selector value; unknown ids fall back to the general inquiry
    /// label.
    pub fn company_name<P: DataProvider + ?Sized>(&self, provider: &P) -> String {
        let selected = self.company.trim();
        if selected.is_empty() || selected == GENERAL_INQUIRY {
            return "General Inquiry".to_string();
        }
        provider
            .company(selected)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "General Inquiry".to_string())
    }

    pub fn template_params<P: DataProvider + ?Sized>(&self, provider: &P) -> TemplateParams {
        let mut params = TemplateParams::default();
        params.insert("from_name", self.name.trim());
        params.insert("from_email", self.email.trim());
        params.insert("phone", or_not_provided(self.phone.as_deref()));
        params.insert("company", self.company_name(provider));
        params.insert("subject", self.subject.trim());
        params.insert("message", self.message.as_str());
        params.insert(
            "resume_attached",
            ResumeAttachment::attached_label(self.resume.as_ref()),
        );
        params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct ApplicationForm {
    pub job_id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cover_letter: Option<String>,
    #[serde(skip)]
    pub resume: Option<ResumeAttachment>,
}

impl ApplicationForm {
    pub fn validate(&self, policy: &UploadPolicy) -> Result<(), FormError> {
        required("name", &self.name)?;
        check_email(&self.email)?;
        let Some(resume) = &self.resume else {
            return Err(FormError::MissingField { field: "resume" });
        };
        policy.check(resume)
    }

    pub fn template_params<P: DataProvider + ?Sized>(
        &self,
        job: &Job,
        provider: &P,
    ) -> TemplateParams {
        let company_name = job
            .company_id
            .as_deref()
            .and_then(|id| provider.company(id))
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "N/A".to_string());

        let mut params = TemplateParams::default();
        params.insert("job_title", job.title.as_str());
        params.insert("company_name", company_name);
        params.insert("from_name", self.name.trim());
        params.insert("from_email", self.email.trim());
        params.insert("phone", or_not_provided(self.phone.as_deref()));
        params.insert("cover_letter", or_not_provided(self.cover_letter.as_deref()));
        params.insert(
            "resume_attached",
            ResumeAttachment::attached_label(self.resume.as_ref()),
        );
        params
    }
}

/// Delivers a filled-in template.
pub trait Mailer {
    fn send(
        &self,
        kind: FormKind,
        params: &TemplateParams,
    ) -> impl Future<Output = Result<(), FormError>>;
}

/// Logs the payload instead of delivering it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

impl Mailer for LogMailer {
    async fn send(&self, kind: FormKind, params: &TemplateParams) -> Result<(), FormError> {
        let payload = serde_json::to_string(params).map_err(|e| FormError::Delivery {
            message: e.to_string(),
        })?;
        tracing::info!(form = kind.as_str(), %payload, "form submission");
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub id: uuid::Uuid,
    pub kind: FormKind,
    pub params: TemplateParams,
    pub notice: Notice,
}

pub struct FormSubmitter<M> {
    mailer: M,
    policy: UploadPolicy,
    in_flight: AtomicBool,
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<M: Mailer> FormSubmitter<M> {
    pub fn new(mailer: M, policy: UploadPolicy) -> Self {
        Self {
            mailer,
            policy,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn mailer(&self) -> &M {
        &self.mailer
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn begin(&self) -> Result<InFlightGuard<'_>, FormError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(FormError::InFlight);
        }
        Ok(InFlightGuard(&self.in_flight))
    }

    async fn deliver(&self, kind: FormKind, params: TemplateParams) -> Result<Receipt, FormError> {
        let _guard = self.begin()?;
        if let Err(err) = self.mailer.send(kind, &params).await {
            tracing::warn!(form = kind.as_str(), error = %err, "form delivery failed");
            return Err(err);
        }
        Ok(Receipt {
            id: uuid::Uuid::new_v4(),
            kind,
            params,
            notice: Notice::success(kind),
        })
    }

    pub async fn submit_contact<P: DataProvider + ?Sized>(
        &self,
        form: &ContactForm,
        provider: &P,
    ) -> Result<Receipt, FormError> {
        if let Err(err) = form.validate(&self.policy) {
            tracing::warn!(form = "contact", error = %err, "form rejected");
            return Err(err);
        }
        self.deliver(FormKind::Contact, form.template_params(provider))
            .await
    }

    pub async fn submit_application<P: DataProvider + ?Sized>(
        &self,
        form: &ApplicationForm,
        job: &Job,
        provider: &P,
    ) -> Result<Receipt, FormError> {
        if let Err(err) = form.validate(&self.policy) {
            tracing::warn!(form = "application", error = %err, "form rejected");
            return Err(err);
        }
        self.deliver(FormKind::Application, form.template_params(job, provider))
            .await
    }
}
