mod email;
mod outbox;
mod smtp;

pub use email::{Attachment, Email, EmailBody};
pub use outbox::FileOutbox;
pub use smtp::SmtpMailer;

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

use crate::config::NotifySettings;
use crate::error::{ExportError, Result};
use crate::export::{ExportedFile, RecipientScope, TransactionKind};
use crate::report::format::DEFAULT_DATETIME_FORMAT;
use crate::store::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleEvent {
    Created,
    Updated,
    Deleted,
    Recovered,
}

impl LifecycleEvent {
    pub fn label(&self) -> &'static str {
        match self {
            LifecycleEvent::Created => "Created",
            LifecycleEvent::Updated => "Updated",
            LifecycleEvent::Deleted => "Deleted",
            LifecycleEvent::Recovered => "Recovered",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LifecycleEvent {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "created" | "create" => Ok(LifecycleEvent::Created),
            "updated" | "update" => Ok(LifecycleEvent::Updated),
            "deleted" | "delete" => Ok(LifecycleEvent::Deleted),
            "recovered" | "recover" => Ok(LifecycleEvent::Recovered),
            other => Err(ExportError::InvalidArgument(format!(
                "Invalid event '{other}'. Use 'created', 'updated', 'deleted', or 'recovered'."
            ))),
        }
    }
}

/// Facts about the changed transaction, already resolved to display text
#[derive(Debug, Clone)]
pub struct ChangeSubject {
    pub kind: TransactionKind,
    pub number: String,
    pub location_id: String,
    pub location_name: String,
    /// ("Party" | "Kitchen", name)
    pub counterparty: Option<(String, String)>,
    pub counterparty_location: Option<String>,
    pub item_summary: String,
    pub total: String,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recipient {
    pub user_id: String,
    pub name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InAppNotification {
    pub transaction_id: String,
    pub event: LifecycleEvent,
    pub title: String,
    pub message: String,
    pub recipients: Vec<String>,
}

/// Loads change facts and renders the current invoice snapshot
pub trait SubjectSource {
    fn subject(&self, transaction_id: &str) -> Result<ChangeSubject>;
    fn snapshot(&self, transaction_id: &str) -> Result<ExportedFile>;
}

pub trait RecipientDirectory {
    /// Users holding any of `roles` at any of `locations`
    fn users_at(&self, locations: &[String], roles: &[Role]) -> Result<Vec<Recipient>>;
}

pub trait InAppNotifier {
    fn notify(&self, notification: &InAppNotification) -> Result<()>;
}

pub trait MailTransport {
    fn send(&self, email: &Email) -> Result<()>;
}

pub struct DispatchRequest {
    pub transaction_id: String,
    pub event: LifecycleEvent,
    pub actor: String,
    pub at: NaiveDateTime,
    /// Invoice captured before the change was committed; required for `Updated`
    pub before: Option<ExportedFile>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmailSummary {
    pub to: Vec<String>,
    pub subject: String,
    pub attachments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DispatchOutcome {
    pub notified: Vec<String>,
    pub email: Option<EmailSummary>,
}

/// One-shot reaction to an already committed transaction change
pub struct Dispatcher<'a> {
    source: &'a dyn SubjectSource,
    directory: &'a dyn RecipientDirectory,
    notifier: &'a dyn InAppNotifier,
    mailer: &'a dyn MailTransport,
    settings: &'a NotifySettings,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        source: &'a dyn SubjectSource,
        directory: &'a dyn RecipientDirectory,
        notifier: &'a dyn InAppNotifier,
        mailer: &'a dyn MailTransport,
        settings: &'a NotifySettings,
    ) -> Self {
        Self {
            source,
            directory,
            notifier,
            mailer,
            settings,
        }
    }

    /// In-app notification first (best effort), then email for every event
    /// except `Created`. Attachment rendering failures abort the call.
    pub fn dispatch(&self, request: DispatchRequest) -> Result<DispatchOutcome> {
        let subject = self.source.subject(&request.transaction_id)?;

        let recipients = match self.resolve_recipients(&subject) {
            Ok(recipients) => recipients,
            Err(e) => {
                warn!(
                    transaction = %subject.number,
                    error = %e,
                    "could not resolve notification recipients, continuing with none"
                );
                Vec::new()
            }
        };

        let notified = self.notify_in_app(&request, &subject, &recipients);

        if request.event == LifecycleEvent::Created {
            return Ok(DispatchOutcome {
                notified,
                email: None,
            });
        }

        let attachments = self.attachments(&request)?;

        let to = self.email_recipients(&recipients);
        if to.is_empty() {
            warn!(transaction = %subject.number, "no email recipients resolved");
        }

        let email = Email {
            to,
            subject: format!("{} {} {}", subject.kind.label(), subject.number, request.event),
            body: email_body(&request, &subject),
            attachments,
        };
        self.mailer.send(&email)?;
        info!(
            subject = %email.subject,
            recipients = email.to.len(),
            attachments = email.attachments.len(),
            "sent change email"
        );

        Ok(DispatchOutcome {
            notified,
            email: Some(EmailSummary {
                to: email.to,
                subject: email.subject,
                attachments: email.attachments.into_iter().map(|a| a.file_name).collect(),
            }),
        })
    }

    fn resolve_recipients(&self, subject: &ChangeSubject) -> Result<Vec<Recipient>> {
        let locations = match subject.kind.recipient_scope() {
            RecipientScope::AdminLocation => vec![self.settings.admin_location.clone()],
            RecipientScope::CounterpartyChain => {
                let mut locations = Vec::new();
                let chain = subject
                    .counterparty_location
                    .iter()
                    .chain([&self.settings.head_office_location, &subject.location_id]);
                for location in chain {
                    if !locations.contains(location) {
                        locations.push(location.clone());
                    }
                }
                locations
            }
        };
        let roles = [Role::Admin, subject.kind.domain_role()];

        let mut recipients: Vec<Recipient> = Vec::new();
        for user in self.directory.users_at(&locations, &roles)? {
            if !recipients.iter().any(|r| r.user_id == user.user_id) {
                recipients.push(user);
            }
        }
        Ok(recipients)
    }

    fn notify_in_app(
        &self,
        request: &DispatchRequest,
        subject: &ChangeSubject,
        recipients: &[Recipient],
    ) -> Vec<String> {
        if recipients.is_empty() {
            return Vec::new();
        }

        let notification = InAppNotification {
            transaction_id: request.transaction_id.clone(),
            event: request.event,
            title: format!("{} {}", subject.kind.label(), request.event),
            message: format!(
                "{} {} was {} by {} at {}",
                subject.kind.label(),
                subject.number,
                request.event.label().to_lowercase(),
                request.actor,
                subject.location_name
            ),
            recipients: recipients.iter().map(|r| r.user_id.clone()).collect(),
        };

        match self.notifier.notify(&notification) {
            Ok(()) => notification.recipients,
            Err(e) => {
                warn!(transaction = %subject.number, error = %e, "in-app notification failed");
                Vec::new()
            }
        }
    }

    fn attachments(&self, request: &DispatchRequest) -> Result<Vec<Attachment>> {
        match request.event {
            LifecycleEvent::Updated => {
                let before = request.before.as_ref().ok_or_else(|| {
                    ExportError::MissingData(format!(
                        "Update notification for '{}' needs the invoice captured before the change",
                        request.transaction_id
                    ))
                })?;
                let after = self.source.snapshot(&request.transaction_id)?;
                Ok(vec![
                    Attachment::new(format!("BEFORE_{}", before.file_name), before.bytes.clone()),
                    Attachment::new(format!("AFTER_{}", after.file_name), after.bytes),
                ])
            }
            LifecycleEvent::Deleted | LifecycleEvent::Recovered => {
                let current = self.source.snapshot(&request.transaction_id)?;
                Ok(vec![Attachment::new(current.file_name, current.bytes)])
            }
            LifecycleEvent::Created => Ok(Vec::new()),
        }
    }

    fn email_recipients(&self, recipients: &[Recipient]) -> Vec<String> {
        let mut to: Vec<String> = Vec::new();
        let addresses = self
            .settings
            .email_to
            .iter()
            .chain(recipients.iter().filter_map(|r| r.email.as_ref()));
        for address in addresses {
            if !to.iter().any(|a| a.eq_ignore_ascii_case(address)) {
                to.push(address.clone());
            }
        }
        to
    }
}

fn email_body(request: &DispatchRequest, subject: &ChangeSubject) -> EmailBody {
    let mut facts = vec![
        ("Transaction Type".to_string(), subject.kind.label().to_string()),
        ("Transaction Number".to_string(), subject.number.clone()),
        ("Action".to_string(), request.event.label().to_string()),
        ("Location".to_string(), subject.location_name.clone()),
    ];
    if let Some((label, name)) = &subject.counterparty {
        facts.push((label.clone(), name.clone()));
    }
    facts.push(("Items".to_string(), subject.item_summary.clone()));
    facts.push(("Total".to_string(), subject.total.clone()));
    facts.push(("By".to_string(), request.actor.clone()));
    facts.push((
        "At".to_string(),
        request.at.format(DEFAULT_DATETIME_FORMAT).to_string(),
    ));

    EmailBody {
        facts,
        remarks: subject.remarks.clone().filter(|r| !r.trim().is_empty()),
    }
}
