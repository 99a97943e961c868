use omen_core::utils::to_checksum_address;
use omen_scanner::ScanReport;
use std::fmt::{self, Write};

/// Leitura qualitativa do índice de previsão
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Índice acima de 85
    Flourishing,
    /// Índice acima de 50
    Emerging,
    Established,
}

impl Verdict {
    pub fn from_score(score: f64) -> Self {
        if score > 85.0 {
            Verdict::Flourishing
        } else if score > 50.0 {
            Verdict::Emerging
        } else {
            Verdict::Established
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Flourishing => {
                "Sinais fortes: quase todos os remetentes são novos, o alvo está atraindo uma onda de recém-chegados."
            }
            Verdict::Emerging => {
                "Sinais moderados: os novos remetentes já são maioria, há um crescimento em formação."
            }
            Verdict::Established => {
                "Sinais estáveis: a atividade vem principalmente de remetentes já conhecidos."
            }
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Verdict::Flourishing => "florescente",
            Verdict::Emerging => "emergente",
            Verdict::Established => "estabelecido",
        };
        f.write_str(label)
    }
}

/// Relatório textual para o terminal
pub fn render_report(report: &ScanReport) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_report(&mut out, report)?;
    Ok(out)
}

fn write_report(out: &mut String, report: &ScanReport) -> fmt::Result {
    let summary = &report.summary;
    let verdict = Verdict::from_score(summary.foresight_score);
    let elapsed = report.finished_at - report.started_at;

    writeln!(out, "Alvo:                  {}", to_checksum_address(&report.target))?;
    writeln!(
        out,
        "Janela:                {} ({} blocos)",
        report.range,
        report.range.block_count()
    )?;
    writeln!(out, "Interações:            {}", summary.total_interactions)?;
    writeln!(out, "Remetentes únicos:     {}", summary.unique_count())?;
    writeln!(out, "Remetentes novos:      {}", summary.new_count())?;
    writeln!(out, "Índice de previsão:    {:.2}", summary.foresight_score)?;
    writeln!(out, "Veredito:              {}", verdict)?;
    writeln!(out, "  {}", verdict.message())?;

    if !report.skipped.is_empty() {
        writeln!(out, "Blocos pulados ({}):", report.skipped.len())?;
        for skipped in &report.skipped {
            writeln!(out, "  #{}: {}", skipped.height, skipped.reason)?;
        }
    }
    if report.is_partial() {
        writeln!(
            out,
            "PARCIAL: leitura interrompida após {} de {} blocos",
            report.blocks_observed(),
            report.range.block_count()
        )?;
    }
    writeln!(out, "Duração:               {} ms", elapsed.num_milliseconds())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use omen_core::{utils::normalize_address, Address};
    use omen_scanner::{
        BlockRange, Completeness, InteractionAggregator, KnownSendersBaseline, SkippedBlock,
    };

    fn report(completeness: Completeness, skipped: Vec<SkippedBlock>) -> ScanReport {
        let mut aggregator = InteractionAggregator::new();
        aggregator.record_sender(Address::repeat_byte(0x01));
        aggregator.record_sender(Address::repeat_byte(0x02));
        aggregator.record_sender(Address::repeat_byte(0x02));
        let baseline: KnownSendersBaseline = std::iter::once(Address::repeat_byte(0x01)).collect();
        let now = Utc::now();
        ScanReport {
            target: normalize_address("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap(),
            range: BlockRange::new(98, 100).unwrap(),
            summary: aggregator.finish(&baseline),
            blocks_scanned: 3 - skipped.len() as u64,
            skipped,
            completeness,
            started_at: now,
            finished_at: now,
        }
    }

    #[test]
    fn verdict_thresholds_are_exclusive() {
        assert_eq!(Verdict::from_score(100.0), Verdict::Flourishing);
        assert_eq!(Verdict::from_score(85.01), Verdict::Flourishing);
        assert_eq!(Verdict::from_score(85.0), Verdict::Emerging);
        assert_eq!(Verdict::from_score(50.01), Verdict::Emerging);
        assert_eq!(Verdict::from_score(50.0), Verdict::Established);
        assert_eq!(Verdict::from_score(0.0), Verdict::Established);
    }

    #[test]
    fn renders_summary_with_checksum_target() {
        let text = render_report(&report(Completeness::Complete, vec![])).unwrap();
        assert!(text.contains("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"));
        assert!(text.contains("98..=100 (3 blocos)"));
        assert!(text.contains("Interações:            3"));
        assert!(text.contains("Remetentes únicos:     2"));
        assert!(text.contains("Índice de previsão:    50.00"));
        assert!(text.contains("estabelecido"));
        assert!(!text.contains("PARCIAL"));
        assert!(!text.contains("Blocos pulados"));
    }

    #[test]
    fn renders_skips_and_partial_label() {
        let skipped = vec![SkippedBlock { height: 99, reason: "Timeout: bloco 99".into() }];
        let text = render_report(&report(Completeness::Partial, skipped)).unwrap();
        assert!(text.contains("Blocos pulados (1):"));
        assert!(text.contains("#99: Timeout: bloco 99"));
        assert!(text.contains("PARCIAL"));
    }
}
