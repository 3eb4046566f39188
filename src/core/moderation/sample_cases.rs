// Sample messages used to smoke-test a moderator end to end.
//
// Each case names the infraction type it must produce and whether the
// default policy blocks it. Links only carry a warning, so they pass through.

use super::moderation_models::InfractionType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleCategory {
    Emails,
    Phones,
    SocialNetworks,
    Payments,
    Links,
}

impl SampleCategory {
    pub fn label(&self) -> &'static str {
        match self {
            SampleCategory::Emails => "Emails",
            SampleCategory::Phones => "Phones",
            SampleCategory::SocialNetworks => "Social networks",
            SampleCategory::Payments => "Payments",
            SampleCategory::Links => "Links",
        }
    }
}

#[derive(Debug)]
pub struct SampleCase {
    pub category: SampleCategory,
    pub message: &'static str,
    pub expected: InfractionType,
    pub expect_blocked: bool,
}

const fn case(
    category: SampleCategory,
    message: &'static str,
    expected: InfractionType,
    expect_blocked: bool,
) -> SampleCase {
    SampleCase {
        category,
        message,
        expected,
        expect_blocked,
    }
}

pub static SAMPLE_CASES: &[SampleCase] = &[
    case(SampleCategory::Emails, "Mi email es juan@gmail.com", InfractionType::Email, true),
    case(SampleCategory::Emails, "Contáctame en mi-correo[at]hotmail.com", InfractionType::Email, true),
    case(SampleCategory::Emails, "Escríbeme a artista(arroba)yahoo.es", InfractionType::Email, true),
    case(SampleCategory::Phones, "Mi teléfono es 555-123-456", InfractionType::Phone, true),
    case(SampleCategory::Phones, "Llámame al +34 666 777 888", InfractionType::Phone, true),
    case(SampleCategory::Phones, "Mi WhatsApp es 123456789", InfractionType::Phone, true),
    case(SampleCategory::SocialNetworks, "Búscame en Instagram como @miartista", InfractionType::SocialHandle, true),
    case(SampleCategory::SocialNetworks, "Mi Twitter es twitter.com/artista", InfractionType::SocialHandle, true),
    case(SampleCategory::SocialNetworks, "Hablemos por Telegram: @usuario", InfractionType::SocialHandle, true),
    case(SampleCategory::Payments, "Te paso mi PayPal: usuario@paypal.com", InfractionType::PaymentReference, true),
    case(SampleCategory::Payments, "Hazme un Bizum al 666777888", InfractionType::PaymentReference, true),
    case(SampleCategory::Payments, "Pago por Stripe directo", InfractionType::PaymentReference, true),
    case(SampleCategory::Links, "Visita mi web en miportfolio.com", InfractionType::ExternalLink, false),
    case(SampleCategory::Links, "Mira mis fotos en ejemplo.net/galeria", InfractionType::ExternalLink, false),
];
