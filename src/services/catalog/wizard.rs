//! Classic Wizard Catalog
//!
//! The step-wizard question bank: cultural profile, business maturity,
//! management style, the quick/detailed bifurcation, the extended
//! detailed-analysis block, and the results step. The bifurcation is
//! encoded as branch rules on the `analysisPreference` field.

use crate::models::{
    AnswerType, AnswerValue, Block, BranchRule, Catalog, CatalogMode, ChoiceOption, Language,
    Question, VisibilityOp, VisibilityRule,
};

/// Build the classic wizard catalog for a language.
pub fn build(language: Language) -> Catalog {
    let blocks = vec![
        profile_block(language),
        business_block(language),
        management_block(language),
        analysis_choice_block(language),
        detailed_analysis_block(language),
        results_block(language),
    ];

    // quick → skip straight to results; detailed → extended questions first
    let branch_rules = vec![
        BranchRule {
            after_block: "analysis-choice".to_string(),
            field: "analysisPreference".to_string(),
            value: "quick".to_string(),
            goto_block: "results".to_string(),
        },
        BranchRule {
            after_block: "analysis-choice".to_string(),
            field: "analysisPreference".to_string(),
            value: "detailed".to_string(),
            goto_block: "detailed-analysis".to_string(),
        },
    ];

    Catalog {
        language,
        mode: CatalogMode::Wizard,
        blocks,
        branch_rules,
    }
}

fn es(language: Language) -> bool {
    language == Language::Es
}

fn profile_block(language: Language) -> Block {
    let spanish = es(language);
    Block::new(
        "profile",
        if spanish {
            "Perfil cultural"
        } else {
            "Cultural profile"
        },
        vec![
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
            .with_options(industry_options(spanish))
            .required(),
            Question::new(
                "activities",
                if spanish {
                    "¿Qué actividades realizas actualmente?"
                } else {
                    "Which activities are you currently doing?"
                },
                AnswerType::MultipleChoice,
                "activities",
            )
            .with_options(activity_options(spanish))
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
            .with_options(experience_options(spanish))
            .required(),
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
            .with_options(yes_somewhat_no_options(spanish))
            .required(),
        ],
    )
}

fn business_block(language: Language) -> Block {
    let spanish = es(language);
    Block::new(
        "business",
        if spanish {
            "Madurez del negocio"
        } else {
            "Business maturity"
        },
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
            .with_options(sales_consistency_options(spanish))
            .visible_when(VisibilityRule {
                field: "hasSold".to_string(),
                op: VisibilityOp::Equals,
                value: Some(AnswerValue::Bool(true)),
            }),
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
            .with_options(payment_method_options(spanish))
            .required(),
            Question::new(
                "financial-control",
                if spanish {
                    "¿Llevas control de tus finanzas?"
                } else {
                    "Do you keep track of your finances?"
                },
                AnswerType::SingleChoice,
                "financialControl",
            )
            .with_options(vec![
                ChoiceOption::new(
                    "detailed",
                    if spanish { "Sí, control detallado" } else { "Yes, detailed control" },
                    "detailed",
                ),
                ChoiceOption::new(
                    "somewhat",
                    if spanish { "Algo, de manera informal" } else { "Somewhat, informally" },
                    "somewhat",
                ),
                ChoiceOption::new(
                    "none",
                    if spanish { "No llevo control" } else { "No tracking at all" },
                    "none",
                ),
            ])
            .required(),
        ],
    )
}

fn management_block(language: Language) -> Block {
    let spanish = es(language);
    Block::new(
        "management",
        if spanish {
            "Estilo de gestión"
        } else {
            "Management style"
        },
        vec![
            Question::new(
                "team-structure",
                if spanish { "¿Cómo trabajas?" } else { "How do you work?" },
                AnswerType::SingleChoice,
                "teamStructure",
            )
            .with_options(team_structure_options(spanish))
            .required(),
            Question::new(
                "task-organization",
                if spanish {
                    "¿Cómo organizas tus tareas?"
                } else {
                    "How do you organize your tasks?"
                },
                AnswerType::SingleChoice,
                "taskOrganization",
            )
            .with_options(vec![
                ChoiceOption::new(
                    "memory",
                    if spanish { "De memoria" } else { "From memory" },
                    "memory",
                ),
                ChoiceOption::new(
                    "notebook",
                    if spanish { "Cuaderno o agenda" } else { "Notebook or planner" },
                    "notebook",
                ),
                ChoiceOption::new(
                    "digital-tools",
                    if spanish { "Herramientas digitales" } else { "Digital tools" },
                    "digital-tools",
                ),
            ])
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
            .with_options(collaboration_type_options(spanish)),
        ],
    )
}

fn analysis_choice_block(language: Language) -> Block {
    let spanish = es(language);
    Block::new(
        "analysis-choice",
        if spanish {
            "Tipo de análisis"
        } else {
            "Analysis type"
        },
        vec![Question::new(
            "analysis-preference",
            if spanish {
                "¿Quieres un análisis rápido o uno profundo?"
            } else {
                "Do you want a quick or an in-depth analysis?"
            },
            AnswerType::SingleChoice,
            "analysisPreference",
        )
        .with_options(vec![
            ChoiceOption::new(
                "quick",
                if spanish { "Rápido" } else { "Quick" },
                "quick",
            )
            .with_description(if spanish {
                "Resultados inmediatos con lo que ya respondiste"
            } else {
                "Immediate results from what you already answered"
            }),
            ChoiceOption::new(
                "detailed",
                if spanish { "Profundo" } else { "Detailed" },
                "detailed",
            )
            .with_description(if spanish {
                "Algunas preguntas más para un diagnóstico afinado"
            } else {
                "A few more questions for a sharper diagnosis"
            }),
        ])
        .required()],
    )
}

fn detailed_analysis_block(language: Language) -> Block {
    let spanish = es(language);
    Block::new(
        "detailed-analysis",
        if spanish {
            "Análisis profundo"
        } else {
            "Detailed analysis"
        },
        vec![
            Question::new(
                "pricing-method",
                if spanish { "¿Cómo defines tus precios?" } else { "How do you set your prices?" },
                AnswerType::SingleChoice,
                "pricingMethod",
            )
            .with_options(pricing_method_options(spanish))
            .required(),
            Question::new(
                "international-sales",
                if spanish {
                    "¿Has vendido al extranjero?"
                } else {
                    "Have you sold internationally?"
                },
                AnswerType::SingleChoice,
                "internationalSales",
            )
            .with_options(yes_no_options(spanish)),
            Question::new(
                "formalized-business",
                if spanish {
                    "¿Tu negocio está formalizado?"
                } else {
                    "Is your business formally registered?"
                },
                AnswerType::SingleChoice,
                "formalizedBusiness",
            )
            .with_options(yes_no_options(spanish)),
            Question::new(
                "collaboration",
                if spanish {
                    "¿Colaboras con otros creadores o marcas?"
                } else {
                    "Do you collaborate with other creators or brands?"
                },
                AnswerType::SingleChoice,
                "collaboration",
            )
            .with_options(yes_no_options(spanish)),
            Question::new(
                "economic-sustainability",
                if spanish {
                    "¿Tu actividad es económicamente sostenible hoy?"
                } else {
                    "Is your activity economically sustainable today?"
                },
                AnswerType::SingleChoice,
                "economicSustainability",
            )
            .with_options(yes_no_options(spanish)),
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
            .with_range(1.0, 5.0, 1.0),
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
            .with_range(1.0, 5.0, 1.0),
        ],
    )
}

fn results_block(language: Language) -> Block {
    // Display-only step; carries no questions
    Block::new(
        "results",
        if es(language) { "Resultados" } else { "Results" },
        vec![],
    )
}

// Option lists shared between the wizard and fused catalogs. Keeping one
// source per field keeps the scoring rule table valid for both modes.

pub(super) fn industry_options(spanish: bool) -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new(
            "creative",
            if spanish { "Creativo y artesanal" } else { "Creative & artisan" },
            "creative",
        ),
        ChoiceOption::new(
            "services",
            if spanish { "Servicios y consultoría" } else { "Services & consulting" },
            "services",
        ),
        ChoiceOption::new(
            "retail",
            if spanish { "Comercio y ventas" } else { "Retail & commerce" },
            "retail",
        ),
        ChoiceOption::new(
            "tech",
            if spanish { "Tecnología" } else { "Technology" },
            "tech",
        ),
        ChoiceOption::new(
            "education",
            if spanish { "Educación y formación" } else { "Education & training" },
            "education",
        ),
        ChoiceOption::new("other", if spanish { "Otro" } else { "Other" }, "other"),
    ]
}

pub(super) fn activity_options(spanish: bool) -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new(
            "design",
            if spanish { "Diseño y creación" } else { "Design & creation" },
            "design",
        ),
        ChoiceOption::new(
            "classes",
            if spanish { "Clases y talleres" } else { "Classes & workshops" },
            "classes",
        ),
        ChoiceOption::new(
            "services",
            if spanish { "Servicios personalizados" } else { "Personal services" },
            "services",
        ),
        ChoiceOption::new(
            "selling-online",
            if spanish { "Venta en línea" } else { "Selling online" },
            "selling-online",
        ),
        ChoiceOption::new(
            "export",
            if spanish { "Exportación" } else { "Export" },
            "export",
        ),
        ChoiceOption::new(
            "manufacturing",
            if spanish { "Producción / manufactura" } else { "Making / manufacturing" },
            "manufacturing",
        ),
    ]
}

pub(super) fn experience_options(spanish: bool) -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new(
            "less-than-6-months",
            if spanish { "Menos de 6 meses" } else { "Less than 6 months" },
            "less-than-6-months",
        ),
        ChoiceOption::new(
            "6-months-to-2-years",
            if spanish { "Entre 6 meses y 2 años" } else { "6 months to 2 years" },
            "6-months-to-2-years",
        ),
        ChoiceOption::new(
            "more-than-2-years",
            if spanish { "Más de 2 años" } else { "More than 2 years" },
            "more-than-2-years",
        ),
    ]
}

pub(super) fn sales_consistency_options(spanish: bool) -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new(
            "rarely",
            if spanish { "Muy rara vez" } else { "Very rarely" },
            "rarely",
        ),
        ChoiceOption::new(
            "occasionally",
            if spanish { "Ocasionalmente" } else { "Occasionally" },
            "occasionally",
        ),
        ChoiceOption::new(
            "regularly",
            if spanish { "Regularmente" } else { "Regularly" },
            "regularly",
        ),
        ChoiceOption::new(
            "consistently",
            if spanish { "De forma muy consistente" } else { "Very consistently" },
            "consistently",
        ),
    ]
}

pub(super) fn payment_method_options(spanish: bool) -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new(
            "cash-or-transfer",
            if spanish { "Efectivo o transferencia" } else { "Cash or bank transfer" },
            "cash-or-transfer",
        ),
        ChoiceOption::new(
            "digital-platforms",
            if spanish { "Plataformas digitales" } else { "Digital platforms" },
            "digital-platforms",
        ),
        ChoiceOption::new(
            "billing-system",
            if spanish { "Sistema de facturación" } else { "Billing system" },
            "billing-system",
        ),
    ]
}

pub(super) fn pricing_method_options(spanish: bool) -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new(
            "myself",
            if spanish { "Los calculo yo con mis costos" } else { "I calculate them from my costs" },
            "myself",
        ),
        ChoiceOption::new(
            "market",
            if spanish { "Copio precios del mercado" } else { "I copy market prices" },
            "market",
        ),
        ChoiceOption::new(
            "no-system",
            if spanish { "No tengo un sistema" } else { "I have no system" },
            "no-system",
        ),
    ]
}

pub(super) fn team_structure_options(spanish: bool) -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new(
            "solo",
            if spanish { "Solo/a" } else { "On my own" },
            "solo",
        ),
        ChoiceOption::new(
            "occasional",
            if spanish { "Con ayuda ocasional" } else { "With occasional help" },
            "occasional",
        ),
        ChoiceOption::new(
            "team",
            if spanish { "Con un equipo estable" } else { "With a stable team" },
            "team",
        ),
    ]
}

pub(super) fn collaboration_type_options(spanish: bool) -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new(
            "other-creators",
            if spanish { "Otros creadores" } else { "Other creators" },
            "other-creators",
        ),
        ChoiceOption::new(
            "businesses",
            if spanish { "Empresas" } else { "Businesses" },
            "businesses",
        ),
        ChoiceOption::new(
            "institutions",
            if spanish { "Instituciones" } else { "Institutions" },
            "institutions",
        ),
    ]
}

fn yes_no_options(spanish: bool) -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new("yes", if spanish { "Sí" } else { "Yes" }, "yes"),
        ChoiceOption::new("no", "No", "no"),
    ]
}

pub(super) fn yes_somewhat_no_options(spanish: bool) -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new("yes", if spanish { "Sí" } else { "Yes" }, "yes"),
        ChoiceOption::new(
            "somewhat",
            if spanish { "En parte" } else { "Somewhat" },
            "somewhat",
        ),
        ChoiceOption::new("no", "No", "no"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_order_matches_flow() {
        let catalog = build(Language::En);
        let ids: Vec<&str> = catalog.blocks.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "profile",
                "business",
                "management",
                "analysis-choice",
                "detailed-analysis",
                "results"
            ]
        );
    }

    #[test]
    fn test_branch_rules_cover_both_choices() {
        let catalog = build(Language::En);
        assert_eq!(
            catalog.branch_target("analysis-choice", "quick"),
            Some("results")
        );
        assert_eq!(
            catalog.branch_target("analysis-choice", "detailed"),
            Some("detailed-analysis")
        );
        assert_eq!(catalog.branch_target("profile", "quick"), None);
    }

    #[test]
    fn test_question_ids_unique_across_catalog() {
        let catalog = build(Language::Es);
        let mut seen = std::collections::HashSet::new();
        for block in &catalog.blocks {
            for question in &block.questions {
                assert!(seen.insert(question.id.clone()), "duplicate id {}", question.id);
            }
        }
    }

    #[test]
    fn test_sales_consistency_visible_only_after_sales() {
        let catalog = build(Language::En);
        let business = catalog.block("business").unwrap();
        let rule = business
            .question("sales-consistency")
            .unwrap()
            .visible_when
            .as_ref()
            .unwrap();
        assert_eq!(rule.field, "hasSold");
    }
}
