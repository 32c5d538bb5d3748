use std::sync::Arc;

use askama::Template;
use axum::extract::State;
use axum::response::Html;

use crate::config::Theme;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage<'a> {
    pub title: &'a str,
    pub logo: &'a str,
    pub placeholder: &'a str,
    pub emoji: &'a str,
}

impl<'a> From<&'a Theme> for IndexPage<'a> {
    fn from(theme: &'a Theme) -> Self {
        Self {
            title: &theme.title,
            logo: &theme.logo,
            placeholder: &theme.placeholder,
            emoji: &theme.emoji,
        }
    }
}

pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    IndexPage::from(&state.theme)
        .render()
        .map(Html)
        .map_err(|err| AppError::Internal(format!("failed to render index page: {err}")))
}

#[cfg(test)]
mod tests {
    use askama::Template;

    use super::IndexPage;
    use crate::config::Theme;

    #[test]
    fn renders_default_theme() {
        let theme = Theme::default();
        let html = IndexPage::from(&theme).render().unwrap();

        assert!(html.contains("<title>The Oktaco Shop</title>"));
        assert!(html.contains("oktaco.png"));
        assert!(html.contains(r#"placeholder="Tacos, burritos, churros...""#));
        assert!(html.contains("🌯"));
    }

    #[test]
    fn theme_values_are_escaped() {
        let theme = Theme {
            title: "<script>alert(1)</script>".to_string(),
            ..Theme::default()
        };
        let html = IndexPage::from(&theme).render().unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
    }
}
