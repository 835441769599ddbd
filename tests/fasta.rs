use assert_matches::assert_matches;

use kira_seqfetch::error::SeqFetchError;
use kira_seqfetch::fasta::{SequenceRecord, parse_fasta, write_fasta};

#[test]
fn parses_multi_record_payload() {
    let payload = "\
>sp|P69905|HBA_HUMAN Hemoglobin subunit alpha OS=Homo sapiens OX=9606 GN=HBA1 PE=1 SV=2
MVLSPADKTNVKAAWGKVGAHAGEYGAEALERMFLSFPTTKTYFPHFDLSHGSAQVKGHG
KKVADALTNAVAHV

>sp|P68871|HBB_HUMAN Hemoglobin subunit beta OS=Homo sapiens OX=9606 GN=HBB PE=1 SV=2
MVHLTPEEKSAVTALWGKVNVDEVGGEALGRLLVVYPWTQRFFESFGDLSTPDAVMGNPK
";
    let records = parse_fasta(payload).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "sp|P69905|HBA_HUMAN");
    assert_eq!(
        records[0].description,
        "sp|P69905|HBA_HUMAN Hemoglobin subunit alpha OS=Homo sapiens OX=9606 GN=HBA1 PE=1 SV=2"
    );
    assert_eq!(records[0].sequence.len(), 74);
    assert_eq!(records[1].id, "sp|P68871|HBB_HUMAN");
}

#[test]
fn empty_body_has_no_records() {
    assert!(parse_fasta("").unwrap().is_empty());
    assert!(parse_fasta("\n\n").unwrap().is_empty());
}

#[test]
fn crlf_line_endings_are_accepted() {
    let records = parse_fasta(">a first\r\nMKV\r\nLLA\r\n>b\r\n").unwrap();
    assert_eq!(records[0].sequence, "MKVLLA");
    assert_eq!(records[1].id, "b");
    assert!(records[1].sequence.is_empty());
}

#[test]
fn residues_before_header_are_rejected() {
    let err = parse_fasta("MKV\n>a\nMKV\n").unwrap_err();
    assert_matches!(err, SeqFetchError::FastaParse(_));
}

#[test]
fn written_output_parses_back() {
    let records = vec![
        SequenceRecord::new("sp|P01106|MYC_HUMAN Myc proto-oncogene protein", "M".repeat(439)),
        SequenceRecord::new("sp|P38398|BRCA1_HUMAN Breast cancer type 1", "MDLSALRVEE"),
    ];
    let mut out = Vec::new();
    write_fasta(&mut out, &records).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with(">sp|P01106|MYC_HUMAN Myc proto-oncogene protein\n"));
    assert_eq!(parse_fasta(&text).unwrap(), records);
}

#[test]
fn header_keeps_leading_space_and_drops_trailing() {
    let records = parse_fasta("> x some protein  \nMKV\n").unwrap();
    assert_eq!(records[0].description, " x some protein");
    assert_eq!(records[0].id, "x");

    let mut out = Vec::new();
    write_fasta(&mut out, &records).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "> x some protein\nMKV\n");
}
