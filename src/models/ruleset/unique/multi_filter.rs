/// Filters may combine sub-filters: `{Military} {Land}` needs all of them, `non-[Wounded]` negates
pub struct MultiFilter;

impl MultiFilter {
    pub fn multi_filter(input: &str, filter_function: &dyn Fn(&str) -> bool) -> bool {
        if input.starts_with('{') && input.ends_with('}') {
            let inner = &input[1..input.len() - 1];
            return inner
                .split("} {")
                .all(|part| Self::multi_filter(part, filter_function));
        }
        if let Some(negated) = input.strip_prefix("non-[").and_then(|rest| rest.strip_suffix(']')) {
            return !Self::multi_filter(negated, filter_function);
        }
        filter_function(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_filters_need_every_part() {
        let matches = |filter: &str| filter == "Military" || filter == "Land";
        assert!(MultiFilter::multi_filter("{Military} {Land}", &matches));
        assert!(!MultiFilter::multi_filter("{Military} {Water}", &matches));
        assert!(MultiFilter::multi_filter("non-[Water]", &matches));
        assert!(!MultiFilter::multi_filter("non-[Land]", &matches));
    }
}
