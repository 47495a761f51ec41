//! HTML rendering for every page.
//!
//! Pages are plain `format!` templates. All user-controlled text goes
//! through [`escape`].

use std::fmt::Write as _;

use axum::{http::StatusCode, response::Html};
use rust_decimal::Decimal;

use tally_db::entities::{accounts, ledger_entries};

use crate::notice::Notice;

/// Escapes text for use in HTML content and attribute values.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Formats a money amount with two decimals.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("{amount:.2}")
}

fn layout(title: &str, notice: Option<&Notice>, logged_in: bool, body: &str) -> Html<String> {
    let nav = if logged_in {
        r#"<a href="/account">Account</a> <a href="/history">History</a> <a href="/logout">Log out</a>"#
    } else {
        r#"<a href="/register">Register</a> <a href="/login">Log in</a>"#
    };
    let notice = notice.map_or_else(String::new, |n| {
        format!(
            r#"<p class="notice notice-{}">{}</p>"#,
            n.level.as_str(),
            escape(&n.message)
        )
    });

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Tally</title>
</head>
<body>
<nav><a href="/">Tally</a> {nav}</nav>
{notice}
<main>
<h1>{title}</h1>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
    ))
}

/// Landing page.
#[must_use]
pub fn index_page(notice: Option<&Notice>, account_name: Option<&str>) -> Html<String> {
    let body = match account_name {
        Some(name) => format!(
            r#"<p>Signed in as <strong>{}</strong>.</p>
<p><a href="/account">Go to your account</a></p>"#,
            escape(name)
        ),
        None => r#"<p>Keep track of a single balance.</p>
<p><a href="/register">Create an account</a> or <a href="/login">log in</a>.</p>"#
            .to_string(),
    };
    layout("Welcome", notice, account_name.is_some(), &body)
}

fn credentials_form(action: &str, submit: &str, name: &str) -> String {
    format!(
        r#"<form method="post" action="{action}">
<label>Name <input type="text" name="name" value="{name}" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">{submit}</button>
</form>"#,
        name = escape(name),
    )
}

/// Registration form, optionally prefilled with a rejected name.
#[must_use]
pub fn register_page(notice: Option<&Notice>, name: &str) -> Html<String> {
    let body = credentials_form("/register", "Register", name)
        + r#"<p>Already registered? <a href="/login">Log in</a></p>"#;
    layout("Register", notice, false, &body)
}

/// Login form, optionally prefilled with the attempted name.
#[must_use]
pub fn login_page(notice: Option<&Notice>, name: &str) -> Html<String> {
    let body = credentials_form("/login", "Log in", name)
        + r#"<p>No account yet? <a href="/register">Register</a></p>"#;
    layout("Log in", notice, false, &body)
}

fn history_table(entries: &[ledger_entries::Model]) -> String {
    if entries.is_empty() {
        return r#"<p class="empty">No transactions yet.</p>"#.to_string();
    }

    let mut rows = String::new();
    for entry in entries {
        let _ = writeln!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            entry.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
            entry.entry_kind().label(),
            format_amount(entry.amount()),
            format_amount(entry.balance_after()),
        );
    }

    format!(
        r#"<table class="history">
<thead><tr><th>Date</th><th>Type</th><th>Amount</th><th>Balance</th></tr></thead>
<tbody>
{rows}</tbody>
</table>"#
    )
}

/// Account page: balance, transaction form and full history.
#[must_use]
pub fn account_page(
    notice: Option<&Notice>,
    account: &accounts::Model,
    entries: &[ledger_entries::Model],
) -> Html<String> {
    let body = format!(
        r#"<p>Signed in as <strong>{name}</strong>.</p>
<p class="balance">Balance: <strong>{balance}</strong></p>
<form method="post" action="/account">
<label>Operation
<select name="operation">
<option value="deposit">Deposit</option>
<option value="withdraw">Withdraw</option>
</select>
</label>
<label>Amount <input type="text" name="amount" inputmode="decimal" required></label>
<button type="submit">Submit</button>
</form>
<h2>History</h2>
{history}"#,
        name = escape(&account.name),
        balance = format_amount(account.balance()),
        history = history_table(entries),
    );
    layout("Account", notice, true, &body)
}

/// Read-only history page.
#[must_use]
pub fn history_page(
    notice: Option<&Notice>,
    account: &accounts::Model,
    entries: &[ledger_entries::Model],
) -> Html<String> {
    let body = format!(
        r#"<p class="balance">Balance: <strong>{}</strong></p>
{}"#,
        format_amount(account.balance()),
        history_table(entries),
    );
    layout("History", notice, true, &body)
}

/// Error page with a status line and a message.
#[must_use]
pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let body = format!(
        r#"<p class="status">{}</p>
<p>{}</p>
<p><a href="/">Back to the start page</a></p>"#,
        status,
        escape(message)
    );
    layout("Error", None, false, &body)
}
