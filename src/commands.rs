//! Command handlers bridging parsed flags to client calls.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use resend_cli::{
    Attachment, Client, Credentials, EmailPayload, Error, NewContact, SenderDefaults, Tag,
};

use crate::cli::{
    AudiencesCommand, Cli, Command, ContactsCommand, DomainsCommand, InboxCommand, SendArgs,
};
use crate::output;

/// CLI-level error separating flag misuse from operational failures.
#[derive(Debug)]
pub enum CliError {
    /// Bad flag combination; exits 2 like clap's own parse errors.
    Usage(String),
    /// Configuration, transport, filesystem, or API failure; exits 1.
    Failure(String),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            Self::Failure(_) => 1,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage(message) | Self::Failure(message) => formatter.write_str(message),
        }
    }
}

impl From<Error> for CliError {
    fn from(error: Error) -> Self {
        Self::Failure(error.to_string())
    }
}

pub type CliResult = Result<(), CliError>;

/// Resolve credentials and build an authenticated client.
fn connect() -> Result<Client, CliError> {
    let credentials = Credentials::resolve()?;
    Ok(Client::new(&credentials.api_key)?)
}

pub async fn dispatch(cli: Cli) -> CliResult {
    match cli.command {
        Command::Send(args) => send(args).await,
        Command::Status { email_id } => status(&email_id).await,
        Command::Inbox(args) => match args.command {
            Some(InboxCommand::Read { email_id }) => inbox_read(&email_id).await,
            None => inbox_list(args.limit).await,
        },
        Command::Domains(command) => match command {
            DomainsCommand::List => domains_list().await,
            DomainsCommand::Verify { domain_id } => domains_verify(&domain_id).await,
        },
        Command::Audiences(command) => match command {
            AudiencesCommand::List => audiences_list().await,
            AudiencesCommand::Create { name } => audiences_create(&name).await,
            AudiencesCommand::Remove { audience_id } => audiences_remove(&audience_id).await,
        },
        Command::Contacts(command) => match command {
            ContactsCommand::List { audience } => contacts_list(&audience).await,
            ContactsCommand::Add {
                audience,
                email,
                first_name,
                last_name,
            } => contacts_add(&audience, email, first_name, last_name).await,
            ContactsCommand::Remove { audience, email } => {
                contacts_remove(&audience, &email).await
            }
        },
    }
}

async fn send(args: SendArgs) -> CliResult {
    let dry_run = args.dry_run;
    let defaults = SenderDefaults::resolve();
    let payload = build_send_payload(args, &defaults)?;

    if dry_run {
        let pretty = serde_json::to_string_pretty(&payload)
            .map_err(|err| CliError::Failure(format!("failed to format payload: {err}")))?;
        println!("{pretty}");
        return Ok(());
    }

    let client = connect()?;
    let sent = client.send_email(&payload).await?;
    output::print_email_sent(&sent);
    Ok(())
}

/// Assemble the send payload from flags and resolved defaults. Unset
/// optional fields stay `None` so they never reach the wire.
fn build_send_payload(args: SendArgs, defaults: &SenderDefaults) -> Result<EmailPayload, CliError> {
    let mut text = args.text;
    let mut html = args.html;
    if let Some(path) = &args.text_file {
        text = Some(read_body_file(path)?);
    }
    if let Some(path) = &args.html_file {
        html = Some(read_body_file(path)?);
    }

    if text.is_none() && html.is_none() {
        return Err(CliError::Usage(
            "provide --text, --html, --text-file, or --html-file".to_string(),
        ));
    }

    if args.sign {
        if let Some(body) = text.as_mut() {
            body.push_str(&format!("\n\n{}", defaults.signature));
        }
        if let Some(body) = html.as_mut() {
            body.push_str(&format!("<br><br>{}", defaults.signature));
        }
    }

    let reply_to = args
        .reply_to
        .filter(|addr| !addr.is_empty())
        .or_else(|| (!defaults.reply_to.is_empty()).then(|| defaults.reply_to.clone()))
        .map(|addr| vec![addr]);

    let attachments = if args.attach.is_empty() {
        None
    } else {
        Some(
            args.attach
                .iter()
                .map(Attachment::from_file)
                .collect::<Result<Vec<_>, _>>()?,
        )
    };

    let tags: Vec<Tag> = args.tags.iter().filter_map(|raw| Tag::parse(raw)).collect();

    let headers = args
        .idempotency_key
        .map(|key| BTreeMap::from([("Idempotency-Key".to_string(), key)]));

    Ok(EmailPayload {
        from: args.from.unwrap_or_else(|| defaults.from.clone()),
        to: args.to,
        subject: args.subject,
        text,
        html,
        reply_to,
        cc: non_empty(args.cc),
        bcc: non_empty(args.bcc),
        attachments,
        tags: (!tags.is_empty()).then_some(tags),
        headers,
    })
}

fn read_body_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| {
        CliError::Failure(format!("cannot read {}: {source}", path.display()))
    })
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    (!values.is_empty()).then_some(values)
}

async fn status(email_id: &str) -> CliResult {
    let client = connect()?;
    let data = client.get_email(email_id).await?;
    output::print_email_status(&data);
    Ok(())
}

async fn inbox_list(limit: Option<usize>) -> CliResult {
    let client = connect()?;
    let mut items = client.list_inbound().await?;
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    output::print_inbound_list(&items);
    Ok(())
}

async fn inbox_read(email_id: &str) -> CliResult {
    let client = connect()?;
    let data = client.get_inbound(email_id).await?;
    output::print_inbound_detail(&data);
    Ok(())
}

async fn domains_list() -> CliResult {
    let client = connect()?;
    let items = client.list_domains().await?;
    output::print_domains(&items);
    Ok(())
}

async fn domains_verify(domain_id: &str) -> CliResult {
    let client = connect()?;
    let data = client.verify_domain(domain_id).await?;
    output::print_domain_verified(&data);
    Ok(())
}

async fn audiences_list() -> CliResult {
    let client = connect()?;
    let items = client.list_audiences().await?;
    output::print_audiences(&items);
    Ok(())
}

async fn audiences_create(name: &str) -> CliResult {
    let client = connect()?;
    let data = client.create_audience(name).await?;
    output::print_audience_created(&data);
    Ok(())
}

async fn audiences_remove(audience_id: &str) -> CliResult {
    let client = connect()?;
    client.delete_audience(audience_id).await?;
    output::print_audience_deleted();
    Ok(())
}

async fn contacts_list(audience_id: &str) -> CliResult {
    let client = connect()?;
    let items = client.list_contacts(audience_id).await?;
    output::print_contacts(&items);
    Ok(())
}

async fn contacts_add(
    audience_id: &str,
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
) -> CliResult {
    let client = connect()?;
    let contact = NewContact {
        email,
        first_name,
        last_name,
        unsubscribed: None,
    };
    let data = client.create_contact(audience_id, &contact).await?;
    output::print_contact_created(&data);
    Ok(())
}

async fn contacts_remove(audience_id: &str, contact_id: &str) -> CliResult {
    let client = connect()?;
    client.delete_contact(audience_id, contact_id).await?;
    output::print_contact_deleted();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn base_args() -> SendArgs {
        SendArgs {
            to: vec!["you@example.com".into()],
            subject: "Hi".into(),
            text: None,
            html: None,
            html_file: None,
            text_file: None,
            from: None,
            reply_to: None,
            cc: Vec::new(),
            bcc: Vec::new(),
            attach: Vec::new(),
            sign: false,
            tags: Vec::new(),
            idempotency_key: None,
            dry_run: false,
        }
    }

    fn defaults() -> SenderDefaults {
        SenderDefaults {
            from: "Default <default@example.com>".into(),
            reply_to: String::new(),
            signature: "-- Me".into(),
        }
    }

    #[test]
    fn missing_body_is_a_usage_error() {
        let err = build_send_payload(base_args(), &defaults()).unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn default_sender_fills_in_when_from_is_absent() {
        let mut args = base_args();
        args.text = Some("Hello".into());

        let payload = build_send_payload(args, &defaults()).unwrap();
        assert_eq!(payload.from, "Default <default@example.com>");
        assert_eq!(payload.reply_to, None);
        assert_eq!(payload.cc, None);
        assert_eq!(payload.bcc, None);
    }

    #[test]
    fn sign_appends_the_signature_to_both_bodies() {
        let mut args = base_args();
        args.text = Some("Hello".into());
        args.html = Some("<p>Hello</p>".into());
        args.sign = true;

        let payload = build_send_payload(args, &defaults()).unwrap();
        assert_eq!(payload.text.unwrap(), "Hello\n\n-- Me");
        assert_eq!(payload.html.unwrap(), "<p>Hello</p><br><br>-- Me");
    }

    #[test]
    fn tags_parse_as_pairs_and_malformed_ones_are_dropped() {
        let mut args = base_args();
        args.text = Some("Hello".into());
        args.tags = vec!["env=prod".into(), "malformed".into()];

        let payload = build_send_payload(args, &defaults()).unwrap();
        let tags = payload.tags.unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "env");
        assert_eq!(tags[0].value, "prod");
    }

    #[test]
    fn idempotency_key_lands_in_the_headers_map() {
        let mut args = base_args();
        args.text = Some("Hello".into());
        args.idempotency_key = Some("key-1".into());

        let payload = build_send_payload(args, &defaults()).unwrap();
        let headers = payload.headers.unwrap();
        assert_eq!(headers.get("Idempotency-Key").unwrap(), "key-1");
    }

    #[test]
    fn body_files_are_read_into_the_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("body.txt");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"From a file")
            .unwrap();

        let mut args = base_args();
        args.text_file = Some(path);

        let payload = build_send_payload(args, &defaults()).unwrap();
        assert_eq!(payload.text.unwrap(), "From a file");
    }

    #[test]
    fn missing_body_file_is_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = base_args();
        args.text_file = Some(dir.path().join("absent.txt"));

        let err = build_send_payload(args, &defaults()).unwrap_err();
        assert!(matches!(err, CliError::Failure(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn explicit_reply_to_wins_over_the_default() {
        let mut args = base_args();
        args.text = Some("Hello".into());
        args.reply_to = Some("reply@example.com".into());

        let mut with_default = defaults();
        with_default.reply_to = "fallback@example.com".into();

        let payload = build_send_payload(args, &with_default).unwrap();
        assert_eq!(payload.reply_to.unwrap(), vec!["reply@example.com"]);
    }

    #[test]
    fn attachments_are_encoded_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"hello world")
            .unwrap();

        let mut args = base_args();
        args.text = Some("Hello".into());
        args.attach = vec![path];

        let payload = build_send_payload(args, &defaults()).unwrap();
        let attachments = payload.attachments.unwrap();
        assert_eq!(attachments[0].filename, "note.txt");
        assert_eq!(attachments[0].content, "aGVsbG8gd29ybGQ=");
    }
}
