//! # Built-in Catalog Module
//!
//! ## Purpose
//! The static content dataset served by the site: five law areas with their
//! subdivisions, topics, speakers and episodes. Constructed once at startup
//! and never mutated.
//!
//! ## Input/Output Specification
//! - **Input**: The prototype flag (nested topics vs flat episode lists)
//! - **Output**: A `Catalog` ready for validation and rendering
//!
//! Episode rows carry no explicit video identifier; the configured fallback
//! applies to all of them. Speaker photos reference external thumbnails and
//! optional full-size variants for the enlargement modal.

use crate::taxonomy::{Area, Catalog, Episode, Speaker, Subdivision, SubdivisionContent, Topic};

fn ep(number: &str, title: &str, description: &str, duration: &str, date: &str) -> Episode {
    Episode {
        number: number.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        duration: duration.to_string(),
        date: date.to_string(),
        video_id: None,
    }
}

fn speaker(
    name: &str,
    role: &str,
    institution: &str,
    image: &str,
    full_image: Option<&str>,
    description: &str,
) -> Speaker {
    Speaker {
        name: name.to_string(),
        role: role.to_string(),
        institution: institution.to_string(),
        image: image.to_string(),
        full_image: full_image.map(str::to_string),
        description: description.to_string(),
    }
}

fn topic(title: &str, description: &str, speakers: Vec<Speaker>, episodes: Vec<Episode>) -> Topic {
    Topic {
        title: title.to_string(),
        description: description.to_string(),
        speakers,
        episodes,
    }
}

fn subdivision(title: &str, content: SubdivisionContent) -> Subdivision {
    Subdivision {
        title: title.to_string(),
        content,
    }
}

/// Build the built-in catalog. With `prototype` set, subdivisions carry
/// nested topic sections with speakers; otherwise each subdivision lists a
/// reduced, flat set of episodes directly.
pub fn builtin(prototype: bool) -> Catalog {
    Catalog {
        areas: vec![
            civil(prototype),
            penal(prototype),
            administrativo(prototype),
            constitucional(prototype),
            comercial(prototype),
        ],
    }
}

fn civil(prototype: bool) -> Area {
    let intro = if prototype {
        SubdivisionContent::Topics(vec![
            topic(
                "Conceitos Fundamentais",
                "Definições‑chave do Direito Civil, sujeitos de direito, relações jurídicas \
                 e factos jurídicos. Introduz a noção de capacidade, personalidade e eficácia \
                 das situações jurídicas no quotidiano. Ideal para criar bases sólidas para \
                 os restantes tópicos.",
                vec![
                    speaker(
                        "Dr. António Silva",
                        "Professor Catedrático",
                        "Faculdade de Direito da Universidade de Lisboa",
                        "https://images.unsplash.com/photo-1506794778202-cad84cf45f1d?w=400&h=250&fit=crop&crop=face",
                        Some("https://images.unsplash.com/photo-1506794778202-cad84cf45f1d?w=800&h=500&fit=crop&crop=face"),
                        "Especialista em Direito Civil com mais de 20 anos de experiência académica e prática.",
                    ),
                    speaker(
                        "Dra. Maria Santos",
                        "Advogada e Investigadora",
                        "Centro de Investigação Jurídica",
                        "https://images.unsplash.com/photo-1494790108755-2616b612b786?w=400&h=250&fit=crop&crop=face",
                        Some("https://images.unsplash.com/photo-1494790108755-2616b612b786?w=800&h=500&fit=crop&crop=face"),
                        "Doutorada em Direito Civil, autora de diversos artigos científicos na área.",
                    ),
                ],
                vec![
                    ep("Ep. 01", "Conceitos Fundamentais", "Introdução aos conceitos básicos do Direito Civil Português", "45 min", "15 Mar 2024"),
                    ep("Ep. 02", "Pessoas e Personalidade", "Personalidade jurídica e capacidade das pessoas", "52 min", "22 Mar 2024"),
                    ep("Ep. 02a", "Capacidade Jurídica", "Capacidade de gozo e de exercício", "36 min", "25 Mar 2024"),
                ],
            ),
            topic(
                "Estrutura do Ordenamento",
                "Como as fontes do direito se articulam: Constituição, leis, regulamentos e \
                 costume. Abordamos também a hierarquia normativa e os critérios de resolução \
                 de conflitos entre normas.",
                vec![
                    speaker(
                        "Prof. João Costa",
                        "Professor Associado",
                        "Faculdade de Direito da Universidade do Porto",
                        "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=400&h=250&fit=crop&crop=face",
                        Some("https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=800&h=500&fit=crop&crop=face"),
                        "Especialista em Teoria do Direito e Filosofia Jurídica.",
                    ),
                    speaker(
                        "Dr. Pedro Almeida",
                        "Juiz Desembargador",
                        "Tribunal da Relação de Lisboa",
                        "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=400&h=250&fit=crop&crop=face",
                        Some("https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=800&h=500&fit=crop&crop=face"),
                        "Com vasta experiência na interpretação e aplicação das fontes do direito.",
                    ),
                ],
                vec![ep("Ep. 02b", "Fontes do Direito", "Leis, costumes e princípios gerais", "30 min", "28 Mar 2024")],
            ),
        ])
    } else {
        SubdivisionContent::Episodes(vec![
            ep("Ep. 01", "Conceitos Fundamentais", "Introdução aos conceitos básicos do Direito Civil Português", "45 min", "15 Mar 2024"),
            ep("Ep. 02", "Pessoas e Personalidade", "Personalidade jurídica e capacidade das pessoas", "52 min", "22 Mar 2024"),
        ])
    };

    let obrigacoes = if prototype {
        SubdivisionContent::Topics(vec![
            topic(
                "Contratos - Parte I",
                "Formação do contrato: negociações preliminares, proposta e aceitação. \
                 Analisamos ainda os defeitos da vontade e a proteção das partes durante a \
                 formação do vínculo.",
                vec![
                    speaker(
                        "Dra. Ana Ferreira",
                        "Advogada Especialista",
                        "Sociedade de Advogados Ferreira & Associados",
                        "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=400&h=250&fit=crop&crop=face",
                        Some("https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=800&h=500&fit=crop&crop=face"),
                        "Especialista em Direito dos Contratos com 15 anos de experiência prática.",
                    ),
                    speaker(
                        "Prof. Carlos Mendes",
                        "Professor Catedrático",
                        "Faculdade de Direito da Universidade de Coimbra",
                        "https://images.unsplash.com/photo-1506794778202-cad84cf45f1d?w=400&h=250&fit=crop&crop=face",
                        Some("https://images.unsplash.com/photo-1506794778202-cad84cf45f1d?w=800&h=500&fit=crop&crop=face"),
                        "Autor de diversos livros sobre Direito das Obrigações e Contratos.",
                    ),
                ],
                vec![
                    ep("Ep. 03", "Contratos - Parte I", "Formação e elementos essenciais dos contratos", "48 min", "29 Mar 2024"),
                    ep("Ep. 03a", "Vícios da Vontade", "Erro, dolo e coação na formação dos contratos", "44 min", "1 Abr 2024"),
                ],
            ),
            topic(
                "Contratos - Parte II",
                "Efeitos, cumprimento, mora e incumprimento; resolução e outras causas de \
                 extinção. Inclui panorama prático sobre cláusulas típicas e meios de tutela \
                 do credor.",
                vec![
                    speaker(
                        "Dr. Ricardo Oliveira",
                        "Advogado e Arbitro",
                        "Câmara de Arbitragem de Lisboa",
                        "https://images.unsplash.com/photo-1519085360753-af0119f7cbe7?w=400&h=250&fit=crop&crop=face",
                        Some("https://images.unsplash.com/photo-1519085360753-af0119f7cbe7?w=800&h=500&fit=crop&crop=face"),
                        "Especialista em resolução de litígios contratuais e arbitragem.",
                    ),
                    speaker(
                        "Dra. Sofia Martins",
                        "Professora Auxiliar",
                        "Faculdade de Direito da Universidade Nova de Lisboa",
                        "https://images.unsplash.com/photo-1544005313-94ddf0286df2?w=400&h=250&fit=crop&crop=face",
                        Some("https://images.unsplash.com/photo-1544005313-94ddf0286df2?w=800&h=500&fit=crop&crop=face"),
                        "Investigadora em Direito das Obrigações e Responsabilidade Civil.",
                    ),
                ],
                vec![ep("Ep. 04", "Contratos - Parte II", "Execução e extinção das obrigações contratuais", "55 min", "5 Abr 2024")],
            ),
        ])
    } else {
        SubdivisionContent::Episodes(vec![
            ep("Ep. 03", "Contratos - Parte I", "Formação e elementos essenciais dos contratos", "48 min", "29 Mar 2024"),
            ep("Ep. 04", "Contratos - Parte II", "Execução e extinção das obrigações contratuais", "55 min", "5 Abr 2024"),
        ])
    };

    let coisas = if prototype {
        SubdivisionContent::Topics(vec![topic(
            "Propriedade e Posse",
            "Conceitos de propriedade, posse e tutela possessória; aquisição e perda do \
             domínio. Exemplos do dia a dia para distinguir detenção, composse e usucapião.",
            vec![
                speaker(
                    "Prof. Luís Pereira",
                    "Professor Catedrático",
                    "Faculdade de Direito da Universidade de Lisboa",
                    "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=400&h=400&fit=crop&crop=face",
                    Some("https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=800&h=800&fit=crop&crop=face"),
                    "Especialista em Direito das Coisas e Propriedade Intelectual.",
                ),
                speaker(
                    "Dr. Francisco Costa",
                    "Notário",
                    "Conservatória do Registo Predial de Lisboa",
                    "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=400&h=400&fit=crop&crop=face",
                    Some("https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=800&h=800&fit=crop&crop=face"),
                    "Com vasta experiência em registos prediais e propriedade imobiliária.",
                ),
            ],
            vec![
                ep("Ep. 05", "Propriedade e Posse", "Conceitos fundamentais do direito de propriedade", "50 min", "12 Abr 2024"),
                ep("Ep. 05a", "Aquisição e Perda da Propriedade", "Modos de aquisição e perda do direito de propriedade", "41 min", "16 Abr 2024"),
            ],
        )])
    } else {
        SubdivisionContent::Episodes(vec![ep(
            "Ep. 05",
            "Propriedade e Posse",
            "Conceitos fundamentais do direito de propriedade",
            "50 min",
            "12 Abr 2024",
        )])
    };

    Area {
        icon: "fas fa-balance-scale".to_string(),
        name: "Direito Civil".to_string(),
        description: "Fundamentos e princípios do direito privado português".to_string(),
        subdivisions: vec![
            subdivision("Introdução ao Direito Civil", intro),
            subdivision("Direito das Obrigações", obrigacoes),
            subdivision("Direito das Coisas", coisas),
        ],
    }
}

fn penal(prototype: bool) -> Area {
    let intro = if prototype {
        SubdivisionContent::Topics(vec![topic(
            "Princípios Fundamentais",
            "Legalidade, anterioridade, irretroatividade, necessidade e outras pedras \
             basilares do ius puniendi. Enquadramento constitucional e implicações práticas \
             na atuação dos tribunais.",
            vec![
                speaker(
                    "Prof. Manuel Santos",
                    "Professor Catedrático",
                    "Faculdade de Direito da Universidade de Coimbra",
                    "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=400&h=400&fit=crop&crop=face",
                    Some("https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=800&h=800&fit=crop&crop=face"),
                    "Especialista em Direito Penal e Processo Penal.",
                ),
                speaker(
                    "Dra. Isabel Rodrigues",
                    "Procuradora da República",
                    "Ministério Público de Lisboa",
                    "https://images.unsplash.com/photo-1494790108755-2616b612b786?w=400&h=400&fit=crop&crop=face",
                    Some("https://images.unsplash.com/photo-1494790108755-2616b612b786?w=800&h=800&fit=crop&crop=face"),
                    "Com vasta experiência na aplicação dos princípios penais.",
                ),
            ],
            vec![ep("Ep. 06", "Princípios Fundamentais", "Princípios constitucionais do direito penal", "47 min", "19 Abr 2024")],
        )])
    } else {
        SubdivisionContent::Episodes(vec![ep(
            "Ep. 06",
            "Princípios Fundamentais",
            "Princípios constitucionais do direito penal",
            "47 min",
            "19 Abr 2024",
        )])
    };

    let teoria = if prototype {
        SubdivisionContent::Topics(vec![topic(
            "Tipicidade e Antijuridicidade",
            "Estrutura do crime: tipo legal, ilicitude, causas de justificação e análise \
             dogmática. Discutimos exemplos práticos de legítima defesa e estado de \
             necessidade.",
            vec![
                speaker(
                    "Dr. José Silva",
                    "Juiz Criminal",
                    "Tribunal Judicial de Lisboa",
                    "https://images.unsplash.com/photo-1506794778202-cad84cf45f1d?w=150&h=150&fit=crop&crop=face",
                    None,
                    "Especialista em teoria do crime e causas de justificação.",
                ),
                speaker(
                    "Prof. Ana Costa",
                    "Professora Auxiliar",
                    "Faculdade de Direito da Universidade do Porto",
                    "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=150&h=150&fit=crop&crop=face",
                    None,
                    "Investigadora em culpabilidade e imputabilidade penal.",
                ),
            ],
            vec![
                ep("Ep. 07", "Tipicidade e Antijuridicidade", "Elementos objetivos do tipo penal", "53 min", "26 Abr 2024"),
                ep("Ep. 07a", "Culpabilidade", "Imputabilidade e dolo/culpa", "39 min", "30 Abr 2024"),
            ],
        )])
    } else {
        SubdivisionContent::Episodes(vec![ep(
            "Ep. 07",
            "Tipicidade e Antijuridicidade",
            "Elementos objetivos do tipo penal",
            "53 min",
            "26 Abr 2024",
        )])
    };

    Area {
        icon: "fas fa-gavel".to_string(),
        name: "Direito Penal".to_string(),
        description: "Princípios e aplicação do direito penal português".to_string(),
        subdivisions: vec![
            subdivision("Introdução ao Direito Penal", intro),
            subdivision("Teoria do Crime", teoria),
        ],
    }
}

fn administrativo(prototype: bool) -> Area {
    let fundamentos = if prototype {
        SubdivisionContent::Topics(vec![topic(
            "Conceito e Princípios",
            "Administração Pública, interesse público e pilares como legalidade, \
             proporcionalidade e boa‑fé. Inclui noções de organização administrativa e \
             tutela jurisdicional.",
            vec![
                speaker(
                    "Prof. Miguel Alves",
                    "Professor Catedrático",
                    "Faculdade de Direito da Universidade de Lisboa",
                    "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=150&h=150&fit=crop&crop=face",
                    None,
                    "Especialista em Direito Administrativo e Ciência Política.",
                ),
                speaker(
                    "Dra. Teresa Lima",
                    "Advogada Especialista",
                    "Sociedade de Advogados Lima & Associados",
                    "https://images.unsplash.com/photo-1494790108755-2616b612b786?w=150&h=150&fit=crop&crop=face",
                    None,
                    "Especialista em contencioso administrativo e direito público.",
                ),
            ],
            vec![
                ep("Ep. 08", "Conceito e Princípios", "Introdução aos princípios fundamentais", "49 min", "3 Mai 2024"),
                ep("Ep. 08a", "Princípio da Legalidade", "Limites e vinculação da Administração", "37 min", "6 Mai 2024"),
            ],
        )])
    } else {
        SubdivisionContent::Episodes(vec![ep(
            "Ep. 08",
            "Conceito e Princípios",
            "Introdução aos princípios fundamentais",
            "49 min",
            "3 Mai 2024",
        )])
    };

    let atos = if prototype {
        SubdivisionContent::Topics(vec![topic(
            "Formação e Validade",
            "Ciclo de vida do ato administrativo, requisitos, eficácia e anulabilidade. \
             Contraste entre nulidade e anulabilidade e consequências para os particulares.",
            vec![
                speaker(
                    "Dr. Paulo Santos",
                    "Juiz Administrativo",
                    "Tribunal Central Administrativo",
                    "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=150&h=150&fit=crop&crop=face",
                    None,
                    "Especialista em controlo jurisdicional da Administração.",
                ),
                speaker(
                    "Prof. Catarina Silva",
                    "Professora Auxiliar",
                    "Faculdade de Direito da Universidade Nova de Lisboa",
                    "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=150&h=150&fit=crop&crop=face",
                    None,
                    "Investigadora em atos administrativos e procedimento administrativo.",
                ),
            ],
            vec![ep("Ep. 09", "Formação e Validade", "Elementos e requisitos dos atos administrativos", "51 min", "10 Mai 2024")],
        )])
    } else {
        SubdivisionContent::Episodes(vec![ep(
            "Ep. 09",
            "Formação e Validade",
            "Elementos e requisitos dos atos administrativos",
            "51 min",
            "10 Mai 2024",
        )])
    };

    Area {
        icon: "fas fa-building".to_string(),
        name: "Direito Administrativo".to_string(),
        description: "Relações entre a Administração Pública e os cidadãos".to_string(),
        subdivisions: vec![
            subdivision("Fundamentos do Direito Administrativo", fundamentos),
            subdivision("Atos Administrativos", atos),
        ],
    }
}

fn constitucional(prototype: bool) -> Area {
    let direitos = if prototype {
        SubdivisionContent::Topics(vec![topic(
            "Direitos, Liberdades e Garantias",
            "Catálogo de direitos na CRP, regime de restrições, reserva de lei e teste de \
             proporcionalidade. Casos ilustrativos sobre colisão de direitos e ponderação \
             judicial.",
            vec![
                speaker(
                    "Prof. Rui Costa",
                    "Professor Catedrático",
                    "Faculdade de Direito da Universidade de Coimbra",
                    "https://images.unsplash.com/photo-1506794778202-cad84cf45f1d?w=150&h=150&fit=crop&crop=face",
                    None,
                    "Especialista em Direito Constitucional e Direitos Fundamentais.",
                ),
                speaker(
                    "Dra. Margarida Oliveira",
                    "Advogada Constitucionalista",
                    "Sociedade de Advogados Costa & Oliveira",
                    "https://images.unsplash.com/photo-1544005313-94ddf0286df2?w=150&h=150&fit=crop&crop=face",
                    None,
                    "Especialista em litígios constitucionais e direitos humanos.",
                ),
            ],
            vec![
                ep("Ep. 10", "Direitos, Liberdades e Garantias", "Análise dos direitos fundamentais na CRP", "54 min", "17 Mai 2024"),
                ep("Ep. 10a", "Restrições a Direitos", "Reserva de lei e proporcionalidade", "42 min", "21 Mai 2024"),
            ],
        )])
    } else {
        SubdivisionContent::Episodes(vec![ep(
            "Ep. 10",
            "Direitos, Liberdades e Garantias",
            "Análise dos direitos fundamentais na CRP",
            "54 min",
            "17 Mai 2024",
        )])
    };

    Area {
        icon: "fas fa-landmark".to_string(),
        name: "Direito Constitucional".to_string(),
        description: "Constituição da República Portuguesa e direitos fundamentais".to_string(),
        subdivisions: vec![subdivision("Direitos Fundamentais", direitos)],
    }
}

fn comercial(prototype: bool) -> Area {
    let sociedades = if prototype {
        SubdivisionContent::Topics(vec![topic(
            "Sociedades Comerciais",
            "Tipos societários, constituição e organização interna: poderes e \
             responsabilidades dos órgãos. Inclui notas sobre deveres dos administradores e \
             responsabilidade perante sócios e terceiros.",
            vec![
                speaker(
                    "Prof. André Mendes",
                    "Professor Catedrático",
                    "Faculdade de Direito da Universidade de Lisboa",
                    "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=150&h=150&fit=crop&crop=face",
                    None,
                    "Especialista em Direito das Sociedades e Direito Comercial.",
                ),
                speaker(
                    "Dr. Fernando Silva",
                    "Advogado Especialista",
                    "Sociedade de Advogados Silva & Associados",
                    "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=150&h=150&fit=crop&crop=face",
                    None,
                    "Especialista em constituição e reestruturação de sociedades.",
                ),
            ],
            vec![
                ep("Ep. 11", "Sociedades Comerciais", "Tipos de sociedades e sua constituição", "56 min", "24 Mai 2024"),
                ep("Ep. 11a", "Órgãos Sociais", "Assembleia geral, administração e fiscalização", "38 min", "28 Mai 2024"),
            ],
        )])
    } else {
        SubdivisionContent::Episodes(vec![ep(
            "Ep. 11",
            "Sociedades Comerciais",
            "Tipos de sociedades e sua constituição",
            "56 min",
            "24 Mai 2024",
        )])
    };

    Area {
        icon: "fas fa-chart-line".to_string(),
        name: "Direito Comercial".to_string(),
        description: "Direito das sociedades e atividades comerciais".to_string(),
        subdivisions: vec![subdivision("Direito das Sociedades", sociedades)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prototype_catalog_validates() {
        let catalog = builtin(true);
        catalog.validate().unwrap();
        assert_eq!(catalog.areas.len(), 5);
        assert_eq!(catalog.episode_count(), 19);
        assert_eq!(catalog.speaker_count(), 22);
    }

    #[test]
    fn test_flat_catalog_validates() {
        let catalog = builtin(false);
        catalog.validate().unwrap();
        assert_eq!(catalog.areas.len(), 5);
        assert_eq!(catalog.episode_count(), 11);
        assert_eq!(catalog.speaker_count(), 0);
    }

    #[test]
    fn test_document_order_starts_with_civil() {
        let catalog = builtin(true);
        let first = catalog.episodes().next().unwrap();
        assert_eq!(first.number, "Ep. 01");
        assert_eq!(catalog.areas[0].name, "Direito Civil");
    }
}
