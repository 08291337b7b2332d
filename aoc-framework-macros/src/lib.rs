//! Procedural macros for the `aoc-framework` crate.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::{Error, Expr, Item, ItemImpl, ItemStruct, Type, parse_macro_input};

/// Properties accepted by `#[solution_runner]`.
#[derive(Default)]
struct RunnerProperties {
    /// Display name, any expression evaluating to `&str`.
    name: Option<Expr>,
    /// The `ParseData` type, when input is parsed before solving.
    parsed: Option<Type>,
    /// The `Solution<PartOne>` type.
    part_one: Option<Type>,
    /// The `Solution<PartTwo>` type.
    part_two: Option<Type>,
}

/// Store the value of a property, rejecting duplicates.
fn set_once<T: syn::parse::Parse>(
    slot: &mut Option<T>,
    meta: &ParseNestedMeta<'_>,
    key: &str,
) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error(format!("duplicate '{key}' property")));
    }
    *slot = Some(meta.value()?.parse()?);
    Ok(())
}

impl RunnerProperties {
    fn parse(&mut self, meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
        if meta.path.is_ident("name") {
            set_once(&mut self.name, meta, "name")
        } else if meta.path.is_ident("parsed") {
            set_once(&mut self.parsed, meta, "parsed")
        } else if meta.path.is_ident("part_one") {
            set_once(&mut self.part_one, meta, "part_one")
        } else if meta.path.is_ident("part_two") {
            set_once(&mut self.part_two, meta, "part_two")
        } else {
            Err(meta.error("unsupported solution runner property"))
        }
    }
}

fn missing(property: &str) -> TokenStream {
    Error::new(
        Span::call_site(),
        format!("missing required property: '{property}'"),
    )
    .to_compile_error()
    .into()
}

/// Implements `aoc_framework::runner::SolutionRunner` for the annotated struct or impl block.
///
/// # Properties
///
/// - `name` (required): expression evaluating to `&str`, the solution's display name.
/// - `part_one` (required): type implementing `Solution<PartOne>`.
/// - `part_two` (optional): type implementing `Solution<PartTwo>`.
/// - `parsed` (optional): type implementing `ParseData`; without it solutions take `str`.
///
/// ```ignore
/// #[solution_runner(
///     name = "Day 17: Clumsy Crucible",
///     parsed = City,
///     part_one = Day17,
///     part_two = Day17
/// )]
/// impl super::AdventOfCode2023<17> {}
/// ```
///
/// A compile error is produced for missing required or duplicated properties, unknown
/// properties, and items other than a struct or impl block.
#[proc_macro_attribute]
pub fn solution_runner(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut properties = RunnerProperties::default();
    let properties_parser = syn::meta::parser(|meta| properties.parse(&meta));
    parse_macro_input!(args with properties_parser);

    let Some(name_expr) = properties.name else {
        return missing("name");
    };
    let Some(part_one_ty) = properties.part_one else {
        return missing("part_one");
    };

    let solve_call = match (properties.parsed, properties.part_two) {
        (None, None) => quote! {
            aoc_framework::runner::solve_half_solution::<#part_one_ty>(
                #name_expr, input, handler, timed
            )
        },
        (None, Some(part_two_ty)) => quote! {
            aoc_framework::runner::solve_full_solution::<#part_one_ty, #part_two_ty>(
                #name_expr, input, handler, timed
            )
        },
        (Some(parsed_ty), None) => quote! {
            aoc_framework::runner::solve_parsed_half_solution::<#parsed_ty, #part_one_ty>(
                #name_expr, input, handler, timed
            )
        },
        (Some(parsed_ty), Some(part_two_ty)) => quote! {
            aoc_framework::runner::solve_parsed_full_solution::<
                #parsed_ty,
                #part_one_ty,
                #part_two_ty
            >(#name_expr, input, handler, timed)
        },
    };

    let original_input = proc_macro2::TokenStream::from(input.clone());
    let runner_ty = match parse_macro_input!(input as Item) {
        Item::Struct(ItemStruct { ident, .. }) => quote! { #ident },
        Item::Impl(ItemImpl { self_ty, .. }) => quote! { #self_ty },
        _ => {
            return Error::new(
                Span::call_site(),
                "the #[solution_runner] macro can only be applied to a struct or an impl block",
            )
            .to_compile_error()
            .into();
        }
    };

    TokenStream::from(quote! {
        #original_input

        impl aoc_framework::runner::SolutionRunner for #runner_ty {
            fn run(
                input: &str,
                handler: &mut dyn aoc_framework::runner::OutputHandler,
                timed: bool
            ) -> aoc_framework::DynamicResult<()> {
                #solve_call
            }
        }
    })
}
