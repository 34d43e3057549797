use super::fixture_catalog;
use crate::forms::{FormKind, MIME_DOCX, MIME_PDF, NoticeLevel, TemplateParams};
use crate::*;
use futures::executor::block_on;
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

fn contact() -> ContactForm {
    ContactForm {
        name: "Asha Patil".to_string(),
        email: "asha@example.com".to_string(),
        phone: None,
        company: "c-beta".to_string(),
        subject: "Partnership".to_string(),
        message: "Let's talk.".to_string(),
        resume: None,
    }
}

fn application() -> ApplicationForm {
    ApplicationForm {
        job_id: "j1".to_string(),
        name: "Ravi".to_string(),
        email: "ravi@example.com".to_string(),
        phone: Some("  ".to_string()),
        cover_letter: None,
        resume: Some(ResumeAttachment::new("ravi.pdf", 1024, MIME_PDF)),
    }
}

#[derive(Default)]
struct RecordingMailer {
    sent: RefCell<Vec<(FormKind, TemplateParams)>>,
}

impl Mailer for RecordingMailer {
    async fn send(
        &self,
        kind: FormKind,
        params: &TemplateParams,
    ) -> std::result::Result<(), FormError> {
        self.sent.borrow_mut().push((kind, params.clone()));
        Ok(())
    }
}

struct FailingMailer;

impl Mailer for FailingMailer {
    async fn send(
        &self,
        _kind: FormKind,
        _params: &TemplateParams,
    ) -> std::result::Result<(), FormError> {
        Err(FormError::Delivery {
            message: "smtp unavailable".to_string(),
        })
    }
}

/// Yields once before completing, so two submissions can overlap under `join!`.
struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            return Poll::Ready(());
        }
        self.0 = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

#[derive(Default)]
struct SlowMailer {
    calls: Cell<usize>,
}

impl Mailer for SlowMailer {
    async fn send(
        &self,
        _kind: FormKind,
        _params: &TemplateParams,
    ) -> std::result::Result<(), FormError> {
        self.calls.set(self.calls.get() + 1);
        YieldOnce(false).await;
        Ok(())
    }
}

#[test]
fn contact_template_params_match_mail_template() {
    let catalog = fixture_catalog();
    let params = contact().template_params(&catalog);
    let pairs: Vec<(&str, &str)> = params.iter().collect();
    assert_eq!(
        pairs,
        vec![
            ("from_name", "Asha Patil"),
            ("from_email", "asha@example.com"),
            ("phone", "Not provided"),
            ("company", "Beta Fuels"),
            ("subject", "Partnership"),
            ("message", "Let's talk."),
            ("resume_attached", "No"),
        ]
    );
}

#[test]
fn contact_company_falls_back_to_general_inquiry() {
    let catalog = fixture_catalog();
    for selected in ["", "general", "no-such-company"] {
        let form = ContactForm {
            company: selected.to_string(),
            ..contact()
        };
        assert_eq!(form.company_name(&catalog), "General Inquiry");
    }
}

#[test]
fn contact_validation_reports_first_problem() {
    let policy = UploadPolicy::default();
    let form = ContactForm {
        name: " ".to_string(),
        ..contact()
    };
    assert_eq!(
        form.validate(&policy),
        Err(FormError::MissingField { field: "name" })
    );

    let form = ContactForm {
        email: "not-an-email".to_string(),
        ..contact()
    };
    assert_eq!(form.validate(&policy), Err(FormError::InvalidEmail));

    let form = ContactForm {
        message: String::new(),
        ..contact()
    };
    assert_eq!(
        form.validate(&policy),
        Err(FormError::MissingField { field: "message" })
    );
}

#[test]
fn upload_policy_checks_size_then_type() {
    let policy = UploadPolicy::default();
    let limit = 5 * 1024 * 1024;

    assert!(policy.check(&ResumeAttachment::new("cv.pdf", limit, MIME_PDF)).is_ok());

    let err = policy
        .check(&ResumeAttachment::new("cv.pdf", limit + 1, MIME_PDF))
        .unwrap_err();
    assert_eq!(err.to_string(), "File size must be less than 5MB");

    let err = policy
        .check(&ResumeAttachment::new("cv.png", limit + 1, "image/png"))
        .unwrap_err();
    assert!(matches!(err, FormError::ResumeTooLarge { .. }));

    let err = policy
        .check(&ResumeAttachment::new("cv.png", 10, "image/png"))
        .unwrap_err();
    assert_eq!(err.to_string(), "Please upload a PDF or Word document");
}

#[test]
fn upload_policy_reads_config() {
    let mut cfg = SiteConfig::defaults();
    cfg.set_value("uploads.maxBytes", serde_json::json!(2048));
    let policy = UploadPolicy::from_config(&cfg);
    assert_eq!(policy.max_bytes, 2048);
    let err = policy
        .check(&ResumeAttachment::new("cv.docx", 4096, MIME_DOCX))
        .unwrap_err();
    assert_eq!(err.to_string(), "File size must be less than 2KB");
}

#[test]
fn resume_mime_is_guessed_from_extension() {
    assert_eq!(ResumeAttachment::guess("CV.PDF", 1).mime, MIME_PDF);
    assert_eq!(ResumeAttachment::guess("cv.docx", 1).mime, MIME_DOCX);
    assert_eq!(
        ResumeAttachment::guess("cv", 1).mime,
        "application/octet-stream"
    );
}

#[test]
fn application_requires_resume() {
    let form = ApplicationForm {
        resume: None,
        ..application()
    };
    assert_eq!(
        form.validate(&UploadPolicy::default()),
        Err(FormError::MissingField { field: "resume" })
    );
}

#[test]
fn application_template_params() {
    let catalog = fixture_catalog();
    let job = catalog.job("j1").unwrap();
    let params = application().template_params(job, &catalog);
    assert_eq!(params.get("job_title"), Some("Rust Engineer"));
    assert_eq!(params.get("company_name"), Some("Zeta Tech"));
    assert_eq!(params.get("phone"), Some("Not provided"));
    assert_eq!(params.get("cover_letter"), Some("Not provided"));
    assert_eq!(params.get("resume_attached"), Some("Yes - ravi.pdf"));

    let job = catalog.job("j3").unwrap();
    let params = application().template_params(job, &catalog);
    assert_eq!(params.get("company_name"), Some("N/A"));
}

#[test]
fn submit_contact_delivers_and_returns_success_notice() {
    let catalog = fixture_catalog();
    let submitter = FormSubmitter::new(RecordingMailer::default(), UploadPolicy::default());
    let receipt = block_on(submitter.submit_contact(&contact(), &catalog)).unwrap();

    assert_eq!(receipt.kind, FormKind::Contact);
    assert_eq!(receipt.notice, Notice::success(FormKind::Contact));
    assert_eq!(
        receipt.notice.message,
        "Message sent successfully! We'll get back to you soon."
    );
    assert!(!submitter.is_submitting());
    assert_eq!(submitter.mailer().sent.borrow().len(), 1);
}

#[test]
fn rejected_forms_never_reach_the_mailer() {
    let catalog = fixture_catalog();
    let mailer = RecordingMailer::default();
    let submitter = FormSubmitter::new(mailer, UploadPolicy::default());
    let form = ContactForm {
        email: String::new(),
        ..contact()
    };
    let err = block_on(submitter.submit_contact(&form, &catalog)).unwrap_err();
    assert_eq!(err, FormError::MissingField { field: "email" });
    assert!(submitter.mailer().sent.borrow().is_empty());
}

#[test]
fn delivery_failure_maps_to_retry_notice() {
    let catalog = fixture_catalog();
    let submitter = FormSubmitter::new(FailingMailer, UploadPolicy::default());
    let job = catalog.job("j1").unwrap();
    let err = block_on(submitter.submit_application(&application(), job, &catalog)).unwrap_err();

    let notice = Notice::from_error(FormKind::Application, &err);
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(
        notice.message,
        "Failed to submit application. Please try again."
    );
    assert!(!submitter.is_submitting());
}

#[test]
fn overlapping_submission_is_rejected_while_in_flight() {
    let catalog = fixture_catalog();
    let submitter = FormSubmitter::new(SlowMailer::default(), UploadPolicy::default());
    let form = contact();

    let (first, second) = block_on(async {
        futures::join!(
            submitter.submit_contact(&form, &catalog),
            submitter.submit_contact(&form, &catalog)
        )
    });

    assert!(first.is_ok());
    assert_eq!(submitter.mailer().calls.get(), 1);
    assert_eq!(second.unwrap_err(), FormError::InFlight);
    assert!(!submitter.is_submitting());

    // The guard is released, so a later submission goes through.
    assert!(block_on(submitter.submit_contact(&form, &catalog)).is_ok());
}

#[test]
fn log_mailer_accepts_payloads() {
    let catalog = fixture_catalog();
    let submitter = FormSubmitter::new(LogMailer, UploadPolicy::default());
    let receipt = block_on(submitter.submit_contact(&contact(), &catalog)).unwrap();
    assert_eq!(receipt.params.len(), 7);
}
