//! HTML pages.
//!
//! Every interpolated value goes through [`escape`].

use std::fmt::Write as _;

use crate::feed::FeedResponse;

/// State of the feed page.
#[derive(Debug, Clone)]
pub struct FeedPage {
    /// Name of the signed-in user.
    pub logged_in_user: String,
    /// Whether the feed API answered its health check.
    pub health: bool,
    pub feed: Option<FeedResponse>,
}

impl FeedPage {
    pub fn new(logged_in_user: impl Into<String>) -> Self {
        Self {
            logged_in_user: logged_in_user.into(),
            health: true,
            feed: None,
        }
    }
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        body
    )
}

pub fn home() -> String {
    layout(
        "Listening feed",
        "<h1>Listening feed</h1>\n<p><a href=\"/auth/login\">Sign in</a> to see what is playing.</p>\n",
    )
}

pub fn login(error: Option<&str>) -> String {
    let mut body = String::from("<h1>Sign in</h1>\n");
    if let Some(error) = error {
        let _ = writeln!(body, "<p class=\"error\">{}</p>", escape(error));
    }
    body.push_str(
        "<form method=\"post\" action=\"/auth/login\">\n\
         <label>Access token <input type=\"password\" name=\"token\" required></label>\n\
         <button type=\"submit\">Sign in</button>\n</form>\n",
    );
    layout("Sign in", &body)
}

pub fn feed(page: &FeedPage) -> String {
    let mut body = String::new();
    let _ = writeln!(
        body,
        "<p>Signed in as {} &middot; <a href=\"/auth/logout\">Sign out</a></p>",
        escape(&page.logged_in_user)
    );

    if !page.health {
        body.push_str("<p class=\"error\">The feed service is unavailable right now. Try again later.</p>\n");
        return layout("Listening feed", &body);
    }

    let Some(response) = &page.feed else {
        return layout("Listening feed", &body);
    };

    if let Some(feed) = &response.feed {
        let _ = writeln!(body, "<h1>{} is listening to</h1>", escape(&feed.username));
        if feed.songs.is_empty() {
            body.push_str("<p>No recent listens.</p>\n");
        } else {
            body.push_str("<ul class=\"songs\">\n");
            for song in &feed.songs {
                let _ = writeln!(
                    body,
                    "<li><span class=\"title\">{}</span> <time datetime=\"{}\">{}</time></li>",
                    escape(&song.title),
                    song.listened_at.to_rfc3339(),
                    song.listened_at.format("%Y-%m-%d %H:%M UTC")
                );
            }
            body.push_str("</ul>\n");
        }
    }

    if response.write_access {
        body.push_str(
            "<form method=\"post\" action=\"/select_feed\">\n\
             <label>Username <input type=\"text\" name=\"name\" required></label>\n\
             <button type=\"submit\">Show this feed</button>\n</form>\n",
        );
    }

    layout("Listening feed", &body)
}
