#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::{
        app::ranker::rank,
        models::Quote,
        test::support::quote,
    };

    fn symbols(quotes: &[Quote]) -> Vec<&str> {
        quotes.iter().map(|q| q.symbol().as_str()).collect()
    }

    #[test]
    fn it_works() {
        let quotes = vec![
            quote("A", dec!(10.00)),
            quote("B", dec!(-10.00)),
            quote("C", dec!(0.00)),
        ];

        let ranking = rank(&quotes, 1);

        assert_eq!(symbols(ranking.gainers()), vec!["A"]);
        assert_eq!(symbols(ranking.losers()), vec!["B"]);
    }

    #[test]
    fn lists_are_sorted_and_capped() {
        let quotes = vec![
            quote("A", dec!(1.5)),
            quote("B", dec!(-3.2)),
            quote("C", dec!(7.1)),
            quote("D", dec!(0.4)),
            quote("E", dec!(-0.9)),
        ];

        let ranking = rank(&quotes, 3);

        assert_eq!(symbols(ranking.gainers()), vec!["C", "A", "D"]);
        assert_eq!(symbols(ranking.losers()), vec!["B", "E", "D"]);
    }

    #[test]
    fn ties_keep_batch_order() {
        let quotes = vec![
            quote("X", dec!(5)),
            quote("Y", dec!(5)),
            quote("Z", dec!(1)),
        ];

        let ranking = rank(&quotes, 3);

        assert_eq!(symbols(ranking.gainers()), vec!["X", "Y", "Z"]);
        assert_eq!(symbols(ranking.losers()), vec!["Z", "X", "Y"]);
    }

    #[test]
    fn small_batch_returns_everything_without_padding() {
        let quotes = vec![quote("A", dec!(2)), quote("B", dec!(-1))];

        let ranking = rank(&quotes, 3);

        assert_eq!(symbols(ranking.gainers()), vec!["A", "B"]);
        assert_eq!(symbols(ranking.losers()), vec!["B", "A"]);
    }

    #[test]
    fn empty_batch_gives_empty_ranking() {
        let ranking = rank(&[], 3);
        assert!(ranking.is_empty());
    }

    #[test]
    fn quotes_without_change_are_ignored() {
        let quotes = vec![
            Quote::new("N".to_string(), None, None, None),
            quote("A", dec!(1)),
        ];

        let ranking = rank(&quotes, 3);

        assert_eq!(symbols(ranking.gainers()), vec!["A"]);
        assert_eq!(symbols(ranking.losers()), vec!["A"]);
    }

    #[test]
    fn ranking_is_idempotent_and_leaves_input_alone() {
        let quotes = vec![
            quote("A", dec!(3)),
            quote("B", dec!(-2)),
            quote("C", dec!(3)),
            quote("D", dec!(0)),
        ];
        let before = quotes.clone();

        let first = rank(&quotes, 2);
        let second = rank(&quotes, 2);

        assert_eq!(first, second);
        assert_eq!(quotes, before);
        for ranked in first.gainers().iter().chain(first.losers()) {
            assert!(quotes.contains(ranked));
        }
    }
}
