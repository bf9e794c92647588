use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ru_supplier_link::popup::export_link;
use ru_supplier_link::preferences::Preferences;
use ru_supplier_link::url_parser::{urlencode, QueryString};

const SEARCH_URL: &str = "http://zakupki.gov.ru/epz/order/quicksearch/search.html?searchString=%D0%BC%D0%B5%D0%B4%D0%B8%D1%86%D0%B8%D0%BD%D1%81%D0%BA%D0%BE%D0%B5+%D0%BE%D0%B1%D0%BE%D1%80%D1%83%D0%B4%D0%BE%D0%B2%D0%B0%D0%BD%D0%B8%D0%B5&morphology=on&pageNumber=1&sortDirection=false&recordsPerPage=_10&fz44=on&fz223=on&priceFrom=100000";

fn query_benchmark(c: &mut Criterion) {
    let raw = SEARCH_URL.split_once('?').map(|(_, q)| q).unwrap_or("");

    c.bench_function("query_parse", |b| b.iter(|| QueryString::parse(black_box(raw))));

    let query = QueryString::parse(raw);
    c.bench_function("query_to_string", |b| b.iter(|| black_box(&query).to_string()));

    c.bench_function("urlencode", |b| b.iter(|| urlencode(black_box(SEARCH_URL))));

    let prefs = Preferences::default();
    c.bench_function("export_link", |b| b.iter(|| export_link(black_box(SEARCH_URL), &prefs)));
}

criterion_group!(benches, query_benchmark);
criterion_main!(benches);
