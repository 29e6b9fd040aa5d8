use immerse_core_contact_impl::ContactServiceImpl;
use immerse_core_health_impl::HealthServiceImpl;
use immerse_email_impl::EmailServiceImpl;
use immerse_templates_impl::TemplateServiceImpl;

pub type Email = EmailServiceImpl;
pub type Template = TemplateServiceImpl;

pub type Contact = ContactServiceImpl<Email, Template>;
pub type Health = HealthServiceImpl<Email>;

pub type RestServer = immerse_api_rest::RestServer<Health, Contact>;
