use std::path::PathBuf;
use std::process::ExitCode;

use answerdesk_backend_client::Client;
use answerdesk_core::Config;
use answerdesk_core::CurrentExchange;
use answerdesk_core::TicketContext;
use answerdesk_core::TicketOutcome;
use answerdesk_core::TicketWorkflow;
use anyhow::Context;
use clap::Args;

use crate::ColorChoice;
use crate::notify::print_notification;

#[derive(Debug, Args)]
pub struct TicketCommand {
    /// Identifier of the signed-in user.
    #[arg(long = "user-id", value_name = "ID")]
    pub user_id: Option<String>,

    /// Identifier of the answered query.
    #[arg(long = "query-id", value_name = "ID")]
    pub query_id: Option<String>,

    /// Question currently shown. Used only when there is no recorded history.
    #[arg(long)]
    pub question: Option<String>,

    /// Answer currently shown. Used only when there is no recorded history.
    #[arg(long, conflicts_with = "answer_file")]
    pub answer: Option<String>,

    /// Read the current answer from a file instead of `--answer`.
    #[arg(long = "answer-file", value_name = "FILE")]
    pub answer_file: Option<PathBuf>,
}

impl TicketCommand {
    fn into_context(self) -> anyhow::Result<TicketContext> {
        let answer = match self.answer_file {
            Some(path) => {
                let contents = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read answer from {}", path.display()))?;
                Some(contents.trim_end_matches(['\n', '\r']).to_string())
            }
            None => self.answer,
        };

        Ok(TicketContext {
            user_id: self.user_id,
            query_id: self.query_id,
            exchange: CurrentExchange::new(self.question, answer),
        })
    }
}

pub(crate) async fn run_ticket(
    cmd: TicketCommand,
    config: &Config,
    colors: ColorChoice,
) -> anyhow::Result<ExitCode> {
    let context = cmd.into_context()?;
    let client = Client::new(config.client_options())?;
    let workflow = TicketWorkflow::new(client, config.ticket_settings());

    match workflow.create_ticket(&context).await {
        TicketOutcome::Completed(notification) => {
            print_notification(&notification, colors)?;
            Ok(if notification.is_error() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        // A single invocation owns its workflow, so nothing else can be in flight.
        TicketOutcome::Suppressed => Ok(ExitCode::FAILURE),
    }
}
