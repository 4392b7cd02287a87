//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "resend-cli", version, about = "Manage emails via the Resend API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Send an email
    Send(SendArgs),
    /// Get sent email delivery status
    Status {
        /// Identifier of a previously sent email
        email_id: String,
    },
    /// List or read inbound emails
    Inbox(InboxArgs),
    /// Manage domains
    #[command(subcommand)]
    Domains(DomainsCommand),
    /// Manage audiences
    #[command(subcommand)]
    Audiences(AudiencesCommand),
    /// Manage contacts
    #[command(subcommand)]
    Contacts(ContactsCommand),
}

#[derive(Args)]
pub struct SendArgs {
    /// Recipient(s)
    #[arg(long = "to", required = true)]
    pub to: Vec<String>,
    /// Subject line
    #[arg(long)]
    pub subject: String,
    /// Plain text body
    #[arg(long)]
    pub text: Option<String>,
    /// HTML body
    #[arg(long)]
    pub html: Option<String>,
    /// Read HTML body from file
    #[arg(long)]
    pub html_file: Option<PathBuf>,
    /// Read text body from file
    #[arg(long)]
    pub text_file: Option<PathBuf>,
    /// Sender (default: RESEND_FROM or placeholder)
    #[arg(long)]
    pub from: Option<String>,
    /// Reply-to address
    #[arg(long)]
    pub reply_to: Option<String>,
    /// CC recipient(s)
    #[arg(long = "cc")]
    pub cc: Vec<String>,
    /// BCC recipient(s)
    #[arg(long = "bcc")]
    pub bcc: Vec<String>,
    /// Attachment file(s)
    #[arg(long = "attach")]
    pub attach: Vec<PathBuf>,
    /// Append the configured signature
    #[arg(long)]
    pub sign: bool,
    /// Tags as name=value
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    /// Idempotency key for send deduplication
    #[arg(long)]
    pub idempotency_key: Option<String>,
    /// Print the payload without sending
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct InboxArgs {
    /// Max results when listing
    #[arg(long)]
    pub limit: Option<usize>,
    #[command(subcommand)]
    pub command: Option<InboxCommand>,
}

#[derive(Subcommand)]
pub enum InboxCommand {
    /// Read a specific inbound email
    Read { email_id: String },
}

#[derive(Subcommand)]
pub enum DomainsCommand {
    /// List all domains
    List,
    /// Trigger verification for a domain
    Verify { domain_id: String },
}

#[derive(Subcommand)]
pub enum AudiencesCommand {
    /// List all audiences
    List,
    /// Create an audience
    Create {
        /// Audience name
        #[arg(long)]
        name: String,
    },
    /// Remove an audience
    Remove { audience_id: String },
}

#[derive(Subcommand)]
pub enum ContactsCommand {
    /// List contacts in an audience
    List {
        /// Audience ID
        #[arg(long)]
        audience: String,
    },
    /// Add a contact to an audience
    Add {
        /// Audience ID
        #[arg(long)]
        audience: String,
        /// Contact email
        #[arg(long)]
        email: String,
        /// First name
        #[arg(long)]
        first_name: Option<String>,
        /// Last name
        #[arg(long)]
        last_name: Option<String>,
    },
    /// Remove a contact from an audience
    Remove {
        /// Audience ID
        #[arg(long)]
        audience: String,
        /// Contact email/ID to remove
        #[arg(long)]
        email: String,
    },
}
