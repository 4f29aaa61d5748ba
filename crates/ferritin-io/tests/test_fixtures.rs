use ferritin_io::{parse_a3m, parse_fasta, parse_hhr, parse_stockholm};
use ferritin_test_data::TestFile;

#[test]
fn test_alignment_fixtures_share_query_width() {
    let (sequences, _) = parse_fasta(TestFile::query_01().as_str()).unwrap();
    let width = sequences[0].len();

    let uniref90 = parse_a3m(TestFile::uniref90_a3m_01().as_str()).unwrap();
    let mgnify = parse_a3m(TestFile::mgnify_a3m_01().as_str()).unwrap();
    let bfd = parse_a3m(TestFile::bfd_uniclust_a3m_01().as_str()).unwrap();
    let small_bfd = parse_stockholm(TestFile::small_bfd_sto_01().as_str()).unwrap();

    for msa in [&uniref90, &mgnify, &bfd, &small_bfd] {
        assert_eq!(msa.sequences[0], sequences[0]);
        for (row, deletions) in msa.sequences.iter().zip(&msa.deletion_matrix) {
            assert_eq!(row.len(), width);
            assert_eq!(deletions.len(), width);
        }
    }

    // "sa" insertion before the 13th column
    assert_eq!(uniref90.deletion_matrix[2][12], 2);
    assert_eq!(small_bfd.deletion_matrix[1][11], 1);
    assert_eq!(small_bfd.descriptions[1], "small bfd hit");
}

#[test]
fn test_hhr_fixture() {
    let hits = parse_hhr(TestFile::pdb70_hhr_01().as_str()).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].aligned_cols, 20);
    assert_eq!(hits[0].sum_probs, Some(18.0));
    assert_eq!(hits[0].query, "MKTAYIAKQRQISFVKSHFS");
    assert_eq!(hits[0].indices_hit.len(), 20);
}

#[test]
fn test_multi_query_fixture() {
    let (sequences, descriptions) = parse_fasta(TestFile::query_multi_01().as_str()).unwrap();
    assert_eq!(sequences.len(), 2);
    assert_eq!(descriptions, vec!["query_1", "query_2"]);
}
