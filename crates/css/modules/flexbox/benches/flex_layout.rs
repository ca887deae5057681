//! Flex layout throughput on wide single lines and many wrapped lines.

use core::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use css_box::LayoutUnit;
use css_flexbox::{
    ChildConstraintSpace, ChildLayoutResult, FlexChild, FlexContainerConstraints,
    FlexContainerStyle, FlexItemStyle, FlexLayoutCache, FlexLayoutTree, FlexWrap, ItemAlignment,
    ItemPosition, ItemRef, perform_flex_layout,
};
use css_sizing::{IntrinsicSizes, SizeValue};

/// Children that read like short runs of text: narrow min-content and a
/// handle-dependent max-content.
struct TextLikeTree;

impl FlexLayoutTree for TextLikeTree {
    fn intrinsic_inline_sizes(&mut self, item: ItemRef) -> IntrinsicSizes {
        let width = i32::try_from(item.0 % 7).unwrap_or_default() * 15 + 40;
        IntrinsicSizes {
            min_content: LayoutUnit::from_int(20),
            max_content: LayoutUnit::from_int(width),
        }
    }

    fn layout_child(&mut self, item: ItemRef, space: &ChildConstraintSpace) -> ChildLayoutResult {
        let lines = if space.inline_size < LayoutUnit::from_int(60) { 2 } else { 1 };
        let content = LayoutUnit::from_int(18 * lines);
        ChildLayoutResult {
            content_block_size: content,
            first_baseline: Some(LayoutUnit::from_int(14)),
            last_baseline: Some(content - LayoutUnit::from_int(4)),
        }
    }
}

fn children(count: u64) -> Vec<FlexChild> {
    (0..count)
        .map(|handle| {
            FlexChild::new(
                ItemRef(handle),
                FlexItemStyle {
                    flex_grow: if handle % 3 == 0 { 1.0 } else { 0.0 },
                    min_width: if handle % 5 == 0 { SizeValue::Auto } else { SizeValue::Fixed(LayoutUnit::zero()) },
                    ..FlexItemStyle::default()
                },
            )
        })
        .collect()
}

fn bench_single_line(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("flex_single_line");
    let style = FlexContainerStyle::default();
    let constraints = FlexContainerConstraints::with_inline_size(LayoutUnit::from_int(1200));
    for count in [8_u64, 64, 256] {
        let items = children(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &items, |bencher, items| {
            bencher.iter(|| {
                let mut cache = FlexLayoutCache::new();
                let output =
                    perform_flex_layout(&style, &constraints, items, &mut TextLikeTree, &mut cache)
                        .unwrap_or_default();
                black_box(output);
            });
        });
    }
    group.finish();
}

fn bench_wrapped_baselines(criterion: &mut Criterion) {
    let style = FlexContainerStyle {
        flex_wrap: FlexWrap::Wrap,
        align_items: ItemAlignment::new(ItemPosition::Baseline),
        ..FlexContainerStyle::default()
    };
    let constraints = FlexContainerConstraints::with_inline_size(LayoutUnit::from_int(480));
    let items = children(256);
    criterion.bench_function("flex_wrapped_baselines_256", |bencher| {
        let mut cache = FlexLayoutCache::new();
        bencher.iter(|| {
            let output = perform_flex_layout(&style, &constraints, &items, &mut TextLikeTree, &mut cache)
                .unwrap_or_default();
            black_box(output);
        });
    });
}

criterion_group!(flex_benches, bench_single_line, bench_wrapped_baselines);
criterion_main!(flex_benches);
