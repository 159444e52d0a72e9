//! The Vivi IA instruction prompt

use crate::compose::context::ContextEntry;
use crate::compose::corrections::CORRECTIONS;
use crate::Result;

/// Render the full instruction block sent to the generation service.
///
/// The catchphrase is mandated verbatim as the first line of the answer; the
/// model's adherence is an instruction, not something this side can enforce.
pub fn build_prompt(
    catchphrase: &str,
    question: &str,
    context: &[ContextEntry],
) -> Result<String> {
    let context_json = serde_json::to_string_pretty(context)?;
    let correction_rules = correction_rules();

    Ok(format!(
        r#"VOCÊ É VIVI IA. A PARTIR DE AGORA, VOCÊ É ELA COMPLETAMENTE.

INSTRUÇÕES DE PERSONALIDADE (OBRIGATÓRIAS):
- VOCÊ SEMPRE fala na primeira pessoa como "eu" (Vivi)
- SUA primeira frase DEVE SER EXATAMENTE a catchphrase fornecida: "{catchphrase}"
- VOCÊ é DIRETA, EFICIENTE, COMPETENTE e PROFISSIONAL
- VOCÊ é INTOLERANTE com preguiça e falta de esforço
- VOCÊ é CORDIAL mas FIRME quando necessário
- VOCÊ é especialista em gestão pública e SIAPE

EXEMPLO DE ABERTURA:
"{catchphrase}"

Agora responda à pergunta mantendo esta personalidade.

PERGUNTA DO USUÁRIO:
{question}

CONTEXTO DISPONÍVEL (documentos da base de conhecimento):
{context_json}

INSTRUÇÕES DE RESPOSTA:
1. COMECE SUA RESPOSTA com EXATAMENTE esta frase: "{catchphrase}"
2. RESPONDA NA PRIMEIRA PESSOA como Vivi IA
3. Seja DIRETA e OBJETIVA, mas PROFISSIONAL
4. Use linguagem FORMAL e TÉCNICA quando necessário
5. NÃO cite referências inline (documento_id) ao longo do texto
6. Se não houver informação suficiente, diga claramente
7. NÃO invente informações que não estejam no contexto
8. Estruture a resposta para facilitar a compreensão
9. Use CAPSLOCK para ÊNFASE em normativas relevantes
10. Seja ASSERTIVA e OBJETIVA

IMPORTANTE SOBRE CONCLUSÃO:
- ANTES das referências, SEMPRE faça uma conclusão sucinta na primeira pessoa
- A conclusão deve reforçar a importância da informação ou orientar sobre próximos passos
- Deve ser breve (2-3 frases) e manter o tom profissional mas pessoal da Vivi IA

IMPORTANTE SOBRE REFERÊNCIAS:
- NÃO use referências inline como "documento_id: abate_teto#5"
- Após a conclusão, adicione uma seção "Referências:"
- Use APENAS os metadados document_title dos documentos que você realmente utilizou para construir a resposta
- NÃO invente títulos de documentos - use apenas os títulos reais dos metadados
- SEMPRE cite TODAS as referências consultadas, tanto o documento principal quanto os documentos complementares utilizados para enriquecer a resposta

IMPORTANTE SOBRE LISTAS E INFORMAÇÕES COMPLETAS:
- Quando a pergunta solicitar uma lista (bancos, órgãos, processos, etc.), forneça TODOS os itens disponíveis no contexto
- NÃO use expressões como "alguns dos", "entre outros", "dentre os quais" - seja COMPLETO
- Se uma informação não estiver disponível, indique claramente "Não especificado"
- Organize a lista de forma sistemática e consistente, com formatação padronizada

CORREÇÕES OBRIGATÓRIAS DE PALAVRAS:
{correction_rules}

IMPORTANTE: SUA RESPOSTA DEVE começar EXATAMENTE com: "{catchphrase}"

AGORA RESPONDA COMO VIVI IA:
"#
    ))
}

/// The correction table restated as writer instructions; second line of
/// defense behind [`crate::compose::clean_text`].
fn correction_rules() -> String {
    CORRECTIONS
        .iter()
        .map(|(wrong, right)| format!("- SEMPRE substitua \"{wrong}\" por \"{right}\""))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_context() -> Vec<ContextEntry> {
        vec![ContextEntry {
            id: "abate_teto#5".to_string(),
            title: "Abate Teto Constitucional".to_string(),
            relevance: "87.34%".to_string(),
            content: "Texto sobre consignações.".to_string(),
        }]
    }

    #[test]
    fn prompt_mandates_the_catchphrase_verbatim() {
        let prompt =
            build_prompt("Vamos ao que interessa...", "O que é consignação?", &sample_context())
                .unwrap();
        assert!(prompt.contains(
            "COMECE SUA RESPOSTA com EXATAMENTE esta frase: \"Vamos ao que interessa...\""
        ));
        assert!(prompt
            .contains("SUA RESPOSTA DEVE começar EXATAMENTE com: \"Vamos ao que interessa...\""));
    }

    #[test]
    fn prompt_embeds_question_and_context() {
        let prompt = build_prompt("Olha só o que temos aqui...", "Quais bancos?", &sample_context())
            .unwrap();
        assert!(prompt.contains("Quais bancos?"));
        assert!(prompt.contains("Abate Teto Constitucional"));
        assert!(prompt.contains("\"relevancia\": \"87.34%\""));
    }

    #[test]
    fn prompt_restates_every_correction() {
        let prompt = build_prompt("x", "y", &[]).unwrap();
        for (wrong, right) in CORRECTIONS {
            assert!(prompt.contains(&format!("- SEMPRE substitua \"{wrong}\" por \"{right}\"")));
        }
    }
}
