//! C# source template for one emission unit

use crate::{types::TypeDescriptor, utils::text::format_source};

const GENERATOR_NAME: &str = "colorto";
const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");
const COLOR_TYPE: &str = "global::Microsoft.Maui.Graphics.Color";
const COLORS_TYPE: &str = "global::Microsoft.Maui.Graphics.Colors";

/// Declaration line of the generated extension method
pub fn method_signature(descriptor: &TypeDescriptor, operation: &str) -> String {
    format!(
        "public static Task<bool> {operation}{generics}(this {element} element, {COLOR_TYPE} color, uint rate = 16u, uint length = 250u, Easing? easing = null, CancellationToken token = default)",
        generics = descriptor.generic_arguments,
        element = descriptor.qualified_type(),
    )
}

fn channel_helper(descriptor: &TypeDescriptor, channel: &str, conversion: &str) -> String {
    format!(
        "\t\tstatic Animation Get{channel}TransformAnimation({element} element, float target{channel}) =>\n\
         \t\t\tnew(v => element.TextColor = element.TextColor.With{channel}({conversion}v), element.TextColor.{channel}, target{channel});\n",
        element = descriptor.qualified_type(),
    )
}

/// Render the complete, normalized source of the unit for `descriptor`
pub fn render(descriptor: &TypeDescriptor, operation: &str) -> String {
    let class_name = format!("ColorAnimationExtensions_{}", descriptor.name);

    let constraints: String = descriptor
        .generic_constraints
        .lines()
        .map(|clause| format!("\t\t{clause}\n"))
        .collect();

    let namespace = if descriptor.namespace.is_empty() {
        String::new()
    } else {
        format!("namespace {};\n", descriptor.namespace)
    };

    let helpers: String = [
        ("Red", ""),
        ("Green", ""),
        ("Blue", ""),
        ("Alpha", "(float)"),
    ]
    .iter()
    .map(|(channel, conversion)| channel_helper(descriptor, channel, conversion))
    .collect::<Vec<_>>()
    .join("\n");

    let source = format!(
        r#"// <auto-generated>
// See: {GENERATOR_NAME} {GENERATOR_VERSION}

#pragma warning disable
#nullable enable

using System;
using System.Threading;
using System.Threading.Tasks;
using Microsoft.Maui;
using Microsoft.Maui.Controls;
using Microsoft.Maui.Graphics;

{namespace}
[global::System.CodeDom.Compiler.GeneratedCode("{GENERATOR_NAME}", "{GENERATOR_VERSION}")]
[global::System.Diagnostics.CodeAnalysis.ExcludeFromCodeCoverage]
{access} static partial class {class_name}
{{
	/// <summary>
	/// Animates the TextColor of an <see cref="Microsoft.Maui.ITextStyle"/> to the given color
	/// </summary>
	/// <param name="element"></param>
	/// <param name="color">The target color to animate the <see cref="Microsoft.Maui.ITextStyle.TextColor"/> to</param>
	/// <param name="rate">The time, in milliseconds, between the frames of the animation</param>
	/// <param name="length">The duration, in milliseconds, of the animation</param>
	/// <param name="easing">The easing function to be used in the animation</param>
	/// <param name="token"><see cref="CancellationToken"/></param>
	/// <returns>Value indicating if the animation completed successfully or not</returns>
	{signature}
{constraints}	{{
		ArgumentNullException.ThrowIfNull(element);
		ArgumentNullException.ThrowIfNull(color);

		if(element is not Microsoft.Maui.ITextStyle)
			throw new ArgumentException($"Element must implement {{nameof(Microsoft.Maui.ITextStyle)}}", nameof(element));

		element.TextColor ??= {COLORS_TYPE}.Transparent;

		var animationCompletionSource = new TaskCompletionSource<bool>();

		try
		{{
			new Animation
			{{
				{{ 0, 1, GetRedTransformAnimation(element, color.Red) }},
				{{ 0, 1, GetGreenTransformAnimation(element, color.Green) }},
				{{ 0, 1, GetBlueTransformAnimation(element, color.Blue) }},
				{{ 0, 1, GetAlphaTransformAnimation(element, color.Alpha) }},
			}}
			.Commit(element, nameof({operation}), rate, length, easing, (d, b) => animationCompletionSource.SetResult(true));
		}}
		catch (ArgumentException aex)
		{{
			// No animation manager yet, e.g. when called from OnAppearing
			System.Diagnostics.Trace.WriteLine($"{{aex.GetType().Name}} thrown in {{typeof({class_name}).FullName}}: {{aex.Message}}");
			animationCompletionSource.SetResult(false);
		}}

		return animationCompletionSource.Task.WaitAsync(token);

{helpers}	}}
}}
"#,
        access = descriptor.access_modifier,
        signature = method_signature(descriptor, operation),
    );

    format_source(&source)
}
