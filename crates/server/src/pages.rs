//! Minimal server-rendered pages.
//!
//! Every value coming from storage goes through [`escape`].

use axum::response::Html;
use engine::{Member, MemberRecord, MembershipDetails};

use crate::auth::Identity;

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n<body>\n<h1>{title}</h1>\n{body}\n</body>\n</html>\n"
    ))
}

fn members_table(members: &[Member]) -> String {
    let rows: String = members
        .iter()
        .map(|m| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                m.id,
                escape(&m.username),
                m.role
            )
        })
        .collect();
    format!("<table>\n<tr><th>ID</th><th>Username</th><th>Role</th></tr>\n{rows}</table>")
}

fn membership_block(membership: Option<&MembershipDetails>) -> String {
    match membership {
        Some(details) => {
            let valid_until = details
                .expires_on()
                .map(|date| date.to_string())
                .unwrap_or_else(|_| "-".to_string());
            format!(
                "<dl><dt>Membership date</dt><dd id=\"membership_date\">{}</dd>\
                 <dt>Membership time</dt><dd id=\"membership_time\">{}</dd>\
                 <dt>Valid until</dt><dd id=\"valid_until\">{valid_until}</dd></dl>",
                details.membership_date,
                escape(&details.membership_time)
            )
        }
        None => "<p>No membership.</p>".to_string(),
    }
}

pub(crate) fn directory(members: &[Member]) -> Html<String> {
    layout(
        "Gym members",
        &format!("{}\n<p><a href=\"/login\">Login</a></p>", members_table(members)),
    )
}

pub(crate) fn login() -> Html<String> {
    layout(
        "Login",
        "<form method=\"post\" action=\"/login\">\
         <input name=\"username\" placeholder=\"Username\">\
         <input name=\"password\" type=\"password\" placeholder=\"Password\">\
         <button type=\"submit\">Login</button></form>",
    )
}

pub(crate) fn admin_home(identity: &Identity) -> Html<String> {
    layout(
        "Admin home",
        &format!(
            "<p>Welcome, {}.</p>\n<ul>\
             <li><a href=\"/all_members\">All members</a></li>\
             <li><a href=\"/add_member\">Add member</a></li>\
             <li><a href=\"/update_member\">Update member</a></li>\
             <li><a href=\"/delete_member\">Delete member</a></li>\
             <li><a href=\"/logout\">Logout</a></li></ul>",
            escape(&identity.username)
        ),
    )
}

pub(crate) fn user_home(identity: &Identity) -> Html<String> {
    layout(
        "Member home",
        &format!(
            "<p>Welcome, {}.</p>\n<ul>\
             <li><a href=\"/view_details\">My membership</a></li>\
             <li><a href=\"/renew_membership\">Renew membership</a></li>\
             <li><a href=\"/logout\">Logout</a></li></ul>",
            escape(&identity.username)
        ),
    )
}

pub(crate) fn all_members(members: &[Member]) -> Html<String> {
    layout("All members", &members_table(members))
}

pub(crate) fn add_member() -> Html<String> {
    layout(
        "Add member",
        "<form method=\"post\" action=\"/add_member\">\
         <input name=\"id\" placeholder=\"ID\">\
         <input name=\"username\" placeholder=\"Username\">\
         <input name=\"password\" type=\"password\" placeholder=\"Password\">\
         <button type=\"submit\">Add</button></form>",
    )
}

pub(crate) fn update_member_lookup() -> Html<String> {
    layout(
        "Update member",
        "<form method=\"post\" action=\"/update_member\">\
         <input name=\"id\" placeholder=\"ID\">\
         <button type=\"submit\">Find</button></form>",
    )
}

pub(crate) fn update_member_form(record: &MemberRecord) -> Html<String> {
    let (date, time) = record
        .membership
        .as_ref()
        .map(|m| (m.membership_date.to_string(), escape(&m.membership_time)))
        .unwrap_or_default();
    layout(
        "Update member",
        &format!(
            "{}\n<form method=\"post\" action=\"/update_member\">\
             <input type=\"hidden\" name=\"id\" value=\"{}\">\
             <input name=\"username\" value=\"{}\">\
             <input name=\"membership_date\" type=\"date\" value=\"{date}\">\
             <input name=\"membership_time\" value=\"{time}\">\
             <button type=\"submit\">Save</button></form>",
            membership_block(record.membership.as_ref()),
            record.member.id,
            escape(&record.member.username),
        ),
    )
}

pub(crate) fn delete_member() -> Html<String> {
    layout(
        "Delete member",
        "<form method=\"post\" action=\"/delete_member\">\
         <input name=\"username\" placeholder=\"Username\">\
         <button type=\"submit\">Delete</button></form>",
    )
}

pub(crate) fn view_details(record: &MemberRecord) -> Html<String> {
    layout(
        "My membership",
        &format!(
            "<p>ID: {}</p><p>Username: {}</p>\n{}",
            record.member.id,
            escape(&record.member.username),
            membership_block(record.membership.as_ref())
        ),
    )
}

pub(crate) fn renew_membership(membership: Option<&MembershipDetails>) -> Html<String> {
    layout(
        "Renew membership",
        &format!(
            "{}\n<form method=\"post\" action=\"/renew_membership\">\
             <button type=\"submit\">Renew for one year</button></form>",
            membership_block(membership)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::Role;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape("<b>\"x\" & 'y'</b>"),
            "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn directory_lists_members_escaped() {
        let members = vec![Member {
            id: 3,
            username: "<script>".to_string(),
            role: Role::User,
        }];
        let Html(page) = directory(&members);
        assert!(page.contains("<td>3</td><td>&lt;script&gt;</td><td>user</td>"));
        assert!(!page.contains("<script>"));
    }
}
