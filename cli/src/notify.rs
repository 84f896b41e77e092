use std::io;
use std::io::Write;

use answerdesk_core::Notification;
use answerdesk_core::NotificationKind;
use owo_colors::OwoColorize;

use crate::ColorChoice;

/// Success goes to stdout, errors to stderr.
pub(crate) fn print_notification(notification: &Notification, colors: ColorChoice) -> io::Result<()> {
    match notification.kind {
        NotificationKind::Success => {
            write_notification(notification, colors.stdout, &mut io::stdout().lock())
        }
        NotificationKind::Error => {
            write_notification(notification, colors.stderr, &mut io::stderr().lock())
        }
    }
}

fn write_notification<W: Write>(
    notification: &Notification,
    color_enabled: bool,
    writer: &mut W,
) -> io::Result<()> {
    let message = notification.message.as_str();
    match (notification.kind, color_enabled) {
        (NotificationKind::Success, true) => writeln!(writer, "{}", message.green()),
        (NotificationKind::Error, true) => writeln!(writer, "{}", message.red().bold()),
        (_, false) => writeln!(writer, "{message}"),
    }
}
