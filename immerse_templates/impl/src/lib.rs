use std::sync::Arc;

use immerse_templates_contracts::{Template, TemplateService, BASE_TEMPLATE, TEMPLATES};
use tera::Tera;

#[derive(Debug, Clone)]
pub struct TemplateServiceImpl {
    tera: Arc<Tera>,
}

impl TemplateServiceImpl {
    pub fn new() -> anyhow::Result<Self> {
        let mut tera = Tera::default();

        let (name, template) = BASE_TEMPLATE;
        tera.add_raw_template(name, template)?;

        for &(name, template) in TEMPLATES {
            tera.add_raw_template(name, template)?;
        }

        Ok(Self { tera: tera.into() })
    }
}

impl TemplateService for TemplateServiceImpl {
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<String> {
        let context = tera::Context::from_serialize(template)?;
        self.tera.render(T::NAME, &context).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use immerse_templates_contracts::ContactSubmissionTemplate;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn contact_submission() {
        // Arrange
        let sut = TemplateServiceImpl::new().unwrap();

        // Act
        let result = sut.render(&ContactSubmissionTemplate {
            name: "Ann Lee".into(),
            email: "ann@example.com".into(),
            message: "Hello!".into(),
        });

        // Assert
        let html = result.unwrap();
        assert!(html.contains("<p><strong>Name:</strong> Ann Lee</p>"));
        assert!(html.contains("<p><strong>Email:</strong> ann@example.com</p>"));
        assert!(html.contains(">Hello!</p>"));
    }

    #[test]
    fn contact_submission_escapes_fields() {
        // Arrange
        let sut = TemplateServiceImpl::new().unwrap();

        // Act
        let result = sut.render(&ContactSubmissionTemplate {
            name: "<b>Ann</b>".into(),
            email: "ann&co@example.com".into(),
            message: "<script>alert(1)</script>".into(),
        });

        // Assert
        let html = result.unwrap();
        assert!(!html.contains("<b>Ann</b>"));
        assert!(html.contains("&lt;b&gt;Ann&lt;"));
        assert!(html.contains("ann&amp;co@example.com"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn contact_submission_line_breaks() {
        // Arrange
        let sut = TemplateServiceImpl::new().unwrap();

        // Act
        let result = sut.render(&ContactSubmissionTemplate {
            name: "Ann".into(),
            email: "ann@example.com".into(),
            message: "first\nsecond\r\n<third>".into(),
        });

        // Assert
        let html = result.unwrap();
        let message = html
            .lines()
            .find(|line| line.contains("white-space: pre-wrap"))
            .unwrap();
        assert_eq!(
            message,
            "<p style=\"white-space: pre-wrap;\">first<br>second<br>&lt;third&gt;</p>"
        );
    }
}
