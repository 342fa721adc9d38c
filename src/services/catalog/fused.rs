//! Fused Conversational Catalog
//!
//! The single-pass conversational question bank: each block opens with an
//! agent message and gathers a slice of the profile. Field names and option
//! values are shared with the classic wizard catalog so one scoring rule
//! table serves both modes.

use crate::models::{
    AnswerType, AnswerValue, Block, Catalog, CatalogMode, ChoiceOption, Language, Question,
    VisibilityOp, VisibilityRule,
};

use super::wizard;

/// Build the fused conversational catalog for a language.
pub fn build(language: Language) -> Catalog {
    Catalog {
        language,
        mode: CatalogMode::Fused,
        blocks: vec![
            fundamentals_block(language),
            target_market_block(language),
            business_reality_block(language),
            growth_block(language),
        ],
        branch_rules: vec![],
    }
}

fn es(language: Language) -> bool {
    language == Language::Es
}

fn fundamentals_block(language: Language) -> Block {
    let spanish = es(language);
    Block::new(
        "business-fundamentals",
        if spanish { "Tu negocio" } else { "Your business" },
        vec![
            Question::new(
                "business-description",
                if spanish {
                    "Describe tu negocio: qué haces, a quién ayudas y qué te hace único"
                } else {
                    "Describe your business: what you do, who you help, and what makes you unique"
                },
                AnswerType::Text,
                "businessDescription",
            )
            .required(),
            Question::new(
                "brand-name",
                if spanish {
                    "¿Cuál es el nombre de tu marca o negocio?"
                } else {
                    "What's your brand or business name?"
                },
                AnswerType::Text,
                "brandName",
            ),
            Question::new(
                "industry",
                if spanish {
                    "¿Qué categoría describe mejor tu trabajo?"
                } else {
                    "Which category best describes your work?"
                },
                AnswerType::SingleChoice,
                "industry",
            )
            .with_options(wizard::industry_options(spanish))
            .required(),
            Question::new(
                "experience",
                if spanish {
                    "¿Cuánto tiempo llevas con tu emprendimiento?"
                } else {
                    "How long have you been running your venture?"
                },
                AnswerType::SingleChoice,
                "experience",
            )
            .with_options(wizard::experience_options(spanish))
            .required(),
        ],
    )
    .with_agent_message(if spanish {
        "¡Hola! Soy tu agente de crecimiento. Empecemos por entender tu negocio para darte los consejos más relevantes."
    } else {
        "Hi! I'm your growth agent. Let's start by understanding your business so I can give you the most relevant advice."
    })
}

fn target_market_block(language: Language) -> Block {
    let spanish = es(language);
    Block::new(
        "target-market",
        if spanish { "Tus clientes" } else { "Your customers" },
        vec![
            Question::new(
                "target-audience",
                if spanish { "¿A quién sirves principalmente?" } else { "Who do you primarily serve?" },
                AnswerType::SingleChoice,
                "targetAudience",
            )
            .with_options(vec![
                ChoiceOption::new(
                    "individuals",
                    if spanish { "Consumidores individuales (B2C)" } else { "Individual consumers (B2C)" },
                    "individuals",
                ),
                ChoiceOption::new(
                    "businesses",
                    if spanish { "Otras empresas (B2B)" } else { "Other businesses (B2B)" },
                    "businesses",
                ),
                ChoiceOption::new(
                    "both",
                    if spanish { "Ambos" } else { "Both" },
                    "both",
                ),
                ChoiceOption::new(
                    "unclear",
                    if spanish { "Aún no lo sé" } else { "Not sure yet" },
                    "unclear",
                ),
            ])
            .required(),
            Question::new(
                "customer-clarity",
                if spanish {
                    "¿Qué tan bien conoces a tu cliente ideal?"
                } else {
                    "How well do you know your ideal customer?"
                },
                AnswerType::Slider,
                "customerClarity",
            )
            .with_range(1.0, 5.0, 1.0)
            .required(),
            Question::new(
                "activities",
                if spanish {
                    "¿Qué actividades o servicios ofreces?"
                } else {
                    "What specific activities or services do you offer?"
                },
                AnswerType::MultipleChoice,
                "activities",
            )
            .with_options(wizard::activity_options(spanish)),
        ],
    )
    .with_agent_message(if spanish {
        "¡Genial! Ahora déjame entender mejor tu mercado. Conocer a tus clientes es clave para crecer."
    } else {
        "Great! Now let me understand your market better. Knowing your customers is crucial for growing your business."
    })
}

fn business_reality_block(language: Language) -> Block {
    let spanish = es(language);
    Block::new(
        "business-reality",
        if spanish { "Tu realidad actual" } else { "Business reality" },
        vec![
            Question::new(
                "has-sold",
                if spanish { "¿Ya realizaste ventas?" } else { "Have you already made sales?" },
                AnswerType::YesNo,
                "hasSold",
            )
            .required(),
            Question::new(
                "sales-consistency",
                if spanish {
                    "¿Con qué frecuencia vendes?"
                } else {
                    "How often do you make sales?"
                },
                AnswerType::SingleChoice,
                "salesConsistency",
            )
            .with_options(wizard::sales_consistency_options(spanish))
            .visible_when(VisibilityRule {
                field: "hasSold".to_string(),
                op: VisibilityOp::Equals,
                value: Some(AnswerValue::Bool(true)),
            }),
            Question::new(
                "pricing-method",
                if spanish { "¿Cómo defines tus precios?" } else { "How do you set your prices?" },
                AnswerType::SingleChoice,
                "pricingMethod",
            )
            .with_options(wizard::pricing_method_options(spanish))
            .required(),
            Question::new(
                "payment-methods",
                if spanish {
                    "¿Cómo cobras por tu trabajo?"
                } else {
                    "How do you get paid for your work?"
                },
                AnswerType::MultipleChoice,
                "paymentMethods",
            )
            .with_options(wizard::payment_method_options(spanish)),
            Question::new(
                "profit-clarity",
                if spanish {
                    "¿Qué tan claro tienes cuánto ganas realmente?"
                } else {
                    "How clearly do you know what you actually earn?"
                },
                AnswerType::Slider,
                "profitClarity",
            )
            .with_range(1.0, 5.0, 1.0),
        ],
    )
    .with_agent_message(if spanish {
        "Hablemos de dónde estás hoy. Necesito entender tu madurez actual para darte los próximos pasos correctos."
    } else {
        "Let's talk about where you are right now. I need to understand your current maturity to give you the right next steps."
    })
}

fn growth_block(language: Language) -> Block {
    let spanish = es(language);
    Block::new(
        "growth",
        if spanish { "Crecimiento" } else { "Growth" },
        vec![
            Question::new(
                "brand-identity",
                if spanish {
                    "¿Tienes una identidad de marca definida?"
                } else {
                    "Do you have a defined brand identity?"
                },
                AnswerType::SingleChoice,
                "brandIdentity",
            )
            .with_options(wizard::yes_somewhat_no_options(spanish))
            .required(),
            Question::new(
                "team-structure",
                if spanish { "¿Cómo trabajas?" } else { "How do you work?" },
                AnswerType::SingleChoice,
                "teamStructure",
            )
            .with_options(wizard::team_structure_options(spanish)),
            Question::new(
                "promotion-channels",
                if spanish {
                    "¿Dónde promocionas tu trabajo?"
                } else {
                    "Where do you promote your work?"
                },
                AnswerType::MultipleChoice,
                "promotionChannels",
            )
            .with_options(vec![
                ChoiceOption::new("instagram", "Instagram", "instagram"),
                ChoiceOption::new("whatsapp", "WhatsApp", "whatsapp"),
                ChoiceOption::new(
                    "website",
                    if spanish { "Sitio web propio" } else { "Own website" },
                    "website",
                ),
                ChoiceOption::new("marketplace", "Marketplaces", "marketplace"),
                ChoiceOption::new(
                    "fairs",
                    if spanish { "Ferias y eventos" } else { "Fairs & events" },
                    "fairs",
                ),
            ]),
            Question::new(
                "marketing-confidence",
                if spanish {
                    "¿Qué tan seguro/a te sientes promocionando tu trabajo?"
                } else {
                    "How confident do you feel promoting your work?"
                },
                AnswerType::Slider,
                "marketingConfidence",
            )
            .with_range(1.0, 5.0, 1.0)
            .required(),
            Question::new(
                "collaboration-types",
                if spanish {
                    "¿Con quién colaboras habitualmente?"
                } else {
                    "Who do you usually collaborate with?"
                },
                AnswerType::MultipleChoice,
                "collaborationTypes",
            )
            .with_options(wizard::collaboration_type_options(spanish)),
        ],
    )
    .with_agent_message(if spanish {
        "Última parte: cómo te muestras al mundo y con quién construyes. Esto define tus recomendaciones."
    } else {
        "Last part: how you show up to the world and who you build with. This shapes your recommendations."
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fused_catalog_has_agent_messages() {
        let catalog = build(Language::En);
        assert_eq!(catalog.mode, CatalogMode::Fused);
        for block in &catalog.blocks {
            assert!(block.agent_message.is_some(), "block {} lacks message", block.id);
        }
    }

    #[test]
    fn test_shared_field_vocabulary_with_wizard() {
        let fused = build(Language::En);
        let wizard = wizard::build(Language::En);

        let field_values = |catalog: &Catalog, field: &str| -> Vec<String> {
            catalog
                .blocks
                .iter()
                .flat_map(|b| &b.questions)
                .filter(|q| q.field_name == field)
                .flat_map(|q| q.options.iter().map(|o| o.value.clone()))
                .collect()
        };

        // Shared fields score identically regardless of catalog mode
        for field in ["experience", "paymentMethods", "brandIdentity"] {
            assert_eq!(
                field_values(&fused, field),
                field_values(&wizard, field),
                "field {field} diverged between modes"
            );
        }
    }

    #[test]
    fn test_no_branch_rules_in_fused_mode() {
        assert!(build(Language::Es).branch_rules.is_empty());
    }
}
