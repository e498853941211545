mod common;

use common::fixtures::*;
use common::pdf_assertions::image_count;
use common::{TestResult, generate_report, test_engine};
use orcas_layout::LayoutError;
use orcas_report::{ChartImage, LegendItem, ReportDocumentInput, ReportError, Section, Value};

#[test]
fn test_single_page_report_round_trip() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut input = report("Top banks", "analysis_screening");
    input.metadata = metadata(&[("Year", Value::from(2024i64))]);
    input
        .sections
        .push(Section::new("Ranking", ["Ticker", "Score"]).with_row(vec![Value::from("BBRI"), Value::from(0.8421)]));

    let pdf = generate_report(&input)?;
    assert_pdf_page_count!(pdf, 1);
    for text in ["Year", "2024", "Ranking", "Ticker", "Score", "BBRI", "0.8421", "Page 1 of 1"] {
        assert_pdf_shows_text!(pdf, text);
    }
    assert_pdf_shows_text!(pdf, "Screening Analysis");
    assert_pdf_shows_text!(pdf, "Generated 2024-03-01 08:30 UTC");
    assert!(pdf.bytes.starts_with(b"%PDF-"));
    Ok(())
}

#[test]
fn test_long_table_overflows_with_repeated_header_and_numbered_footer() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut input = report("Bank comparison", "compare_stocks");
    input.sections.push(ranking_section(150));

    let pdf = generate_report(&input)?;
    let pages = pdf.page_texts();
    let page_count = pages.len();
    assert!(page_count >= 2, "expected overflow, got {page_count} page(s)");

    let first_header = pages[0][pages[0].len() - 5..pages[0].len() - 1].to_vec();
    assert_eq!(
        first_header,
        vec!["ORCAS", "Stock Comparison", "Bank comparison", "Generated 2024-03-01 08:30 UTC"]
    );
    for (index, texts) in pages.iter().enumerate() {
        let len = texts.len();
        assert_eq!(texts[len - 5..len - 1].to_vec(), first_header, "header differs on page {}", index + 1);
        assert_eq!(texts[len - 1], format!("Page {} of {}", index + 1, page_count));
        assert!(texts.iter().any(|t| t == "Ticker"), "column header missing on page {}", index + 1);
    }
    assert!(pages.iter().flatten().any(|t| t == "T149"));
    Ok(())
}

#[test]
fn test_header_and_footer_drawn_once_per_page() -> TestResult {
    let mut input = report("Once", "scoring_scorecard");
    input.sections.push(ranking_section(80));

    let pdf = generate_report(&input)?;
    for texts in pdf.page_texts() {
        assert_eq!(texts.iter().filter(|t| *t == "ORCAS").count(), 1);
        assert_eq!(texts.iter().filter(|t| t.starts_with("Page ")).count(), 1);
        assert_eq!(texts.iter().filter(|t| t.starts_with("Generated ")).count(), 1);
    }
    Ok(())
}

#[test]
fn test_same_input_produces_identical_bytes() -> TestResult {
    let mut input = report("Deterministic", "compare_historical");
    input.metadata = metadata(&[("Period", Value::from("2020-2024"))]);
    input.legend_items = vec![LegendItem::new("BBRI", "#1f77b4"), LegendItem::new("BMRI", "#ff7f0e")];
    input.chart_image = Some(png_chart(16, 8));
    input.sections.push(ranking_section(40).with_note("Historical scores are rebased."));

    let runtime = tokio::runtime::Runtime::new()?;
    let engine = test_engine();
    let first = runtime.block_on(engine.build_report_bytes(&input))?;
    let second = runtime.block_on(engine.build_report_bytes(&input))?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_legend_wraps_without_losing_items() -> TestResult {
    let mut input = report("Legend", "compare_stocks");
    input.legend_items = (0..30)
        .map(|i| LegendItem::new(format!("Series {i}"), "#2ca02c"))
        .collect();

    let pdf = generate_report(&input)?;
    assert_pdf_page_count!(pdf, 1);
    let texts = &pdf.page_texts()[0];
    for i in 0..30 {
        let label = format!("Series {i}");
        assert_eq!(texts.iter().filter(|t| **t == label).count(), 1, "{label}");
    }
    Ok(())
}

#[test]
fn test_chart_is_embedded_as_image() -> TestResult {
    let mut input = report("Chart", "simulation_scenario");
    input.chart_image = Some(ChartImage {
        intrinsic_width: Some(800.0),
        intrinsic_height: Some(400.0),
        ..png_chart(8, 4)
    });
    input.sections.push(ranking_section(3));

    let pdf = generate_report(&input)?;
    assert_eq!(image_count(&pdf.doc), 1);
    assert_pdf_shows_text!(pdf, "T002");
    Ok(())
}

#[test]
fn test_broken_chart_does_not_fail_the_report() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut input = report("Broken chart", "analysis_metric_ranking");
    input.chart_image = Some(ChartImage::new("data:image/png;base64,bm90IGFuIGltYWdl"));
    input.sections.push(ranking_section(2));
    input
        .sections
        .push(Section::new("Peers", ["Ticker", "Peer"]).with_row(["BBRI", "BMRI"]));

    let pdf = generate_report(&input)?;
    assert_pdf_page_count!(pdf, 1);
    assert_eq!(image_count(&pdf.doc), 0);
    let texts = &pdf.page_texts()[0];
    let position = |wanted: &str| texts.iter().position(|t| t == wanted);
    let (ranking, peers) = (position("Ranking"), position("Peers"));
    assert!(ranking.is_some() && peers.is_some(), "section titles missing: {texts:?}");
    assert!(ranking < peers);
    assert_pdf_shows_text!(pdf, "T001");
    assert_pdf_shows_text!(pdf, "BMRI");
    Ok(())
}

#[test]
fn test_cell_longer_than_a_page_flows_onto_following_pages() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let comment = "lorem ipsum dolor sit amet ".repeat(600);
    let mut input = report("Commentary", "compare_stocks");
    input.metadata = metadata(&[("Summary", Value::from("lorem ipsum ".repeat(800)))]);
    input
        .sections
        .push(Section::new("Notes", ["Ticker", "Comment"]).with_row(["BBRI", comment.as_str()]));

    let pdf = generate_report(&input)?;
    let pages = pdf.page_texts();
    assert!(pages.len() >= 3, "expected the long cells to span pages, got {}", pages.len());
    assert_pdf_shows_text!(pdf, "BBRI");
    for (index, texts) in pages.iter().enumerate() {
        assert_eq!(texts.last(), Some(&format!("Page {} of {}", index + 1, pages.len())));
    }
    let repetitions: usize = pages.iter().flatten().map(|t| t.matches("amet").count()).sum();
    assert_eq!(repetitions, 600);
    Ok(())
}

#[test]
fn test_arrows_and_non_latin_text_survive() -> TestResult {
    let mut input = report("Trend → outlook", "compare_stocks");
    input.sections.push(
        Section::new("Moves", ["Ticker", "Direction"])
            .with_row(["BBRI", "up → down"])
            .with_row(["SBER", "Сбербанк ↑"]),
    );

    let pdf = generate_report(&input)?;
    for text in ["Trend → outlook", "up → down", "Сбербанк ↑"] {
        assert_pdf_shows_text!(pdf, text);
    }
    Ok(())
}

#[test]
fn test_ragged_row_is_rejected() {
    let mut input = report("Ragged", "compare_stocks");
    input
        .sections
        .push(Section::new("Ranking", ["Ticker", "Score"]).with_row(["BBRI", "0.8", "extra"]));

    let err = generate_report(&input).err().expect("ragged rows must fail");
    assert!(matches!(
        err,
        ReportError::Layout(LayoutError::RaggedRow { row: 0, expected: 2, found: 3 })
    ));
}

#[test]
fn test_report_from_console_json() -> TestResult {
    let input: ReportDocumentInput = serde_json::from_value(serde_json::json!({
        "name": "Screening\tresults",
        "reportKind": "custom_export",
        "createdAt": "2024-03-01T08:30:00Z",
        "metadata": { "market_cap": 1500000000000u64, "sector": "Banking", "dividend": null },
        "sections": [
            { "title": "Flags", "columns": ["Ticker", "Listed"], "rows": [["BBRI", true], ["BBCA", false]],
              "notes": ["Listed means main board."] }
        ]
    }))?;

    let pdf = generate_report(&input)?;
    for text in [
        "Screeningresults",
        "custom_export",
        "Market Cap",
        "1500000000000",
        "Dividend",
        "–",
        "Yes",
        "No",
        "• Listed means main board.",
    ] {
        assert_pdf_shows_text!(pdf, text);
    }
    Ok(())
}

#[test]
fn test_empty_report_still_has_one_decorated_page() -> TestResult {
    let pdf = generate_report(&report("Empty", "compare_stocks"))?;
    assert_pdf_page_count!(pdf, 1);
    assert_pdf_shows_text!(pdf, "Page 1 of 1");
    Ok(())
}
