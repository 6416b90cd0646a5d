//! Minimal server-side HTML rendering. Pages are plain string assembly with
//! escaping; the frontend styling lives elsewhere.

use std::collections::HashMap;
use std::fmt::Write;

use axum::response::Html;

use crate::api::session::{Flash, SessionUser};
use crate::db::models::{FeedbackWithSubmitter, MenuItem, RatingSummary};

/// Escapes text for interpolation into HTML element content or a quoted
/// attribute value.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, user: Option<&SessionUser>, flash: Option<&Flash>, body: &str) -> Html<String> {
    let nav = match user {
        Some(u) if u.is_admin => format!(
            r#"<a href="/">Home</a> <a href="/feedback">Feedback</a> <a href="/admin">Admin</a> <a href="/logout">Logout ({})</a>"#,
            escape(&u.username)
        ),
        Some(u) => format!(
            r#"<a href="/">Home</a> <a href="/feedback">Feedback</a> <a href="/logout">Logout ({})</a>"#,
            escape(&u.username)
        ),
        None => r#"<a href="/">Home</a> <a href="/login">Login</a> <a href="/register">Register</a>"#.to_string(),
    };
    let notice = match flash {
        Some(f) => format!(
            r#"<p class="flash flash-{}">{}</p>"#,
            escape(&f.level),
            escape(&f.message)
        ),
        None => String::new(),
    };
    Html(format!(
        "<!DOCTYPE html>\n<html><head><title>{title} - Mess</title></head><body>\n\
         <nav>{nav}</nav>\n{notice}\n{body}\n</body></html>"
    ))
}

pub fn index_page(
    menu: &[MenuItem],
    ratings: &HashMap<String, RatingSummary>,
    user: Option<&SessionUser>,
    flash: Option<&Flash>,
) -> Html<String> {
    let mut body = String::from("<h1>Mess Menu</h1>\n<table><tr><th>Day</th><th>Meal</th><th>Item</th></tr>\n");
    for item in menu {
        let _ = write!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&item.day),
            escape(&item.meal_type),
            escape(&item.item)
        );
    }
    body.push_str("</table>\n<h2>Ratings</h2>\n<ul>\n");
    let mut meal_types: Vec<_> = ratings.keys().collect();
    meal_types.sort();
    for meal_type in meal_types {
        let summary = &ratings[meal_type];
        let _ = write!(
            body,
            "<li>{}: {:.1} / 5 ({} ratings)</li>\n",
            escape(meal_type),
            summary.average,
            summary.count
        );
    }
    body.push_str("</ul>");
    layout("Menu", user, flash, &body)
}

pub fn register_page(flash: Option<&Flash>) -> Html<String> {
    layout(
        "Register",
        None,
        flash,
        r#"<h1>Register</h1>
<form method="post" action="/register">
<label>Username <input name="username"></label>
<label>Password <input name="password" type="password"></label>
<button type="submit">Register</button>
</form>"#,
    )
}

pub fn login_page(flash: Option<&Flash>) -> Html<String> {
    layout(
        "Login",
        None,
        flash,
        r#"<h1>Login</h1>
<form method="post" action="/login">
<label>Username <input name="username"></label>
<label>Password <input name="password" type="password"></label>
<button type="submit">Login</button>
</form>"#,
    )
}

pub fn feedback_page(user: &SessionUser, flash: Option<&Flash>) -> Html<String> {
    let body = format!(
        r#"<h1>Feedback</h1>
<form method="post" action="/feedback">
<label>Name <input name="name" value="{}"></label>
<label>Meal <select name="meal_type">
<option>breakfast</option><option>lunch</option><option>dinner</option>
</select></label>
<label>Rating (1-5) <input name="rating"></label>
<label>Comment <textarea name="comment"></textarea></label>
<button type="submit">Submit</button>
</form>"#,
        escape(&user.username)
    );
    layout("Feedback", Some(user), flash, &body)
}

pub fn admin_page(
    feedbacks: &[FeedbackWithSubmitter],
    menu: &[MenuItem],
    user: &SessionUser,
    flash: Option<&Flash>,
) -> Html<String> {
    let mut body = String::from(
        "<h1>Admin</h1>\n<h2>Feedback</h2>\n<table>\
         <tr><th>When</th><th>Submitter</th><th>Name</th><th>Meal</th><th>Rating</th><th>Comment</th><th></th></tr>\n",
    );
    for row in feedbacks {
        let f = &row.feedback;
        let _ = write!(
            body,
            r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>
<td><form method="post" action="/feedback/delete/{}"><button>Delete</button></form></td></tr>
"#,
            escape(&f.created_at),
            escape(row.username.as_deref().unwrap_or("-")),
            escape(&f.name),
            escape(&f.meal_type),
            f.rating,
            escape(&f.comment),
            f.id
        );
    }
    body.push_str("</table>\n<h2>Menu</h2>\n<table><tr><th>Day</th><th>Meal</th><th>Item</th><th></th></tr>\n");
    for item in menu {
        let _ = write!(
            body,
            r#"<tr><td>{}</td><td>{}</td>
<td><form method="post" action="/menu/update/{}"><input name="item" value="{}"><button>Update</button></form></td>
<td><form method="post" action="/menu/delete/{}"><button>Delete</button></form></td></tr>
"#,
            escape(&item.day),
            escape(&item.meal_type),
            item.id,
            escape(&item.item),
            item.id
        );
    }
    body.push_str(
        r#"</table>
<h3>Add menu item</h3>
<form method="post" action="/menu/add">
<label>Day <input name="day"></label>
<label>Meal <input name="meal_type"></label>
<label>Item <input name="item"></label>
<button type="submit">Add</button>
</form>"#,
    );
    layout("Admin", Some(user), flash, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b>&\"'"), "a&lt;b&gt;&amp;&quot;&#39;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_index_page_escapes_menu_text() {
        let menu = vec![MenuItem {
            id: 1,
            day: "Mon".into(),
            meal_type: "lunch".into(),
            item: "<script>alert(1)</script>".into(),
        }];
        let Html(html) = index_page(&menu, &HashMap::new(), None, None);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert"));
    }
}
