use crate::model::question::SubjectPerformance;

pub const REPORT_EMPTY_TEXT: &str = "Não foi possível gerar o relatório.";
pub const REPORT_ERROR_TEXT: &str = "Erro ao conectar com a IA Mentora. Tente novamente.";
pub const STUDY_PLAN_EMPTY_TEXT: &str = "Erro ao gerar plano de estudos.";
pub const STUDY_PLAN_ERROR_TEXT: &str = "Erro de conexão ao gerar plano.";
pub const ESSAY_EMPTY_TEXT: &str = "Não foi possível ler a redação. Tente uma foto mais nítida.";
pub const ESSAY_ERROR_TEXT: &str =
    "Ocorreu um erro ao processar a imagem da redação. Verifique a qualidade da foto e tente uma foto mais nítida.";

const GENERAL_REVIEW_CONTEXT: &str = "O aluno precisa de uma revisão geral e aprofundada.";

pub fn question_prompt(subject: &str) -> String {
    format!(
        "Gere uma questão de múltipla escolha desafiadora para estudantes que estão se preparando para o ENEM (Brasil).\n\
         A questão deve ser sobre: {subject}.\n\
         O estilo deve ser interpretativo e contextualizado, similar às provas recentes do ENEM.\n\
         Forneça exatamente 5 alternativas."
    )
}

pub fn report_prompt(stats: &[SubjectPerformance]) -> String {
    let stats_text = if stats.is_empty() {
        "- Nenhuma questão respondida ainda.".to_string()
    } else {
        stats
            .iter()
            .map(|s| format!("- {}: Acertou {} de {}", s.subject, s.correct, s.total))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!(
        "Atue como um mentor especialista em ENEM. Analise os seguintes dados de desempenho recente do aluno:\n\
         {stats_text}\n\n\
         Forneça um relatório curto e direto (formato markdown) contendo:\n\
         1. Pontos Fortes\n\
         2. Pontos a Melhorar\n\
         3. Dicas rápidas de estudo.\n\n\
         Seja motivador, mas realista. Use emojis."
    )
}

pub fn study_plan_prompt(subject: &str, weakness_context: &str) -> String {
    let context = if weakness_context.trim().is_empty() {
        GENERAL_REVIEW_CONTEXT
    } else {
        weakness_context
    };
    format!(
        "Crie um Plano de Estudos Adaptativo de 5 dias focado exclusivamente em: {subject}.\n\n\
         Contexto do aluno (Erros recentes): {context}\n\n\
         O plano deve ser estruturado em Markdown e conter para cada dia:\n\
         - Tópico Principal (baseado nas fraquezas da área)\n\
         - Resumo Teórico Rápido (1 frase)\n\
         - Sugestão de exercício prático.\n\n\
         No final, inclua uma mensagem motivacional curta."
    )
}

pub fn essay_prompt(theme: &str) -> String {
    format!(
        "Você é um corretor oficial do ENEM. Corrija a redação presente nesta imagem.\n\
         O tema proposto foi: \"{theme}\".\n\n\
         Sua saída deve ser estritamente em Markdown seguindo esta estrutura:\n\n\
         # Nota Final: [0 a 1000]\n\n\
         ## Análise por Competência\n\
         1. **Domínio da Escrita Formal:** [Nota 0-200] - [Breve comentário]\n\
         2. **Compreensão do Tema:** [Nota 0-200] - [Breve comentário]\n\
         3. **Organização das Ideias:** [Nota 0-200] - [Breve comentário]\n\
         4. **Coesão e Coerência:** [Nota 0-200] - [Breve comentário]\n\
         5. **Proposta de Intervenção:** [Nota 0-200] - [Breve comentário]\n\n\
         ## Comentários Gerais\n\
         [Sua opinião construtiva sobre o que melhorar e o que explorar mais]"
    )
}
