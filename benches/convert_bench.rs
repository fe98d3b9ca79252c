use criterion::{Criterion, black_box, criterion_group, criterion_main};

const WIDGET: &str = r#"
define('ui/widget', ['jquery', 'underscore', 'lib/events'], function ($, _, events) {
    'use strict';
    var defaults = {
        visible: true,
        size: 'medium'
    };
    function Widget(element, options) {
        this.element = $(element);
        this.options = _.extend({}, defaults, options);
        events.attach(this);
    }
    Widget.prototype.render = function () {
        if (!this.options.visible) {
            return this;
        }
        this.element.addClass('widget widget-' + this.options.size);
        return this;
    };
    return Widget;
});
"#;

const WRAPPER: &str = r#"
define(function (require, exports, module) {
    'use strict';
    var path = require('path');
    var helpers = require('./helpers');
    exports.join = function (a, b) {
        return path.join(helpers.clean(a), helpers.clean(b));
    };
    exports.VERSION = '1.0.0';
});
"#;

fn convert_benchmark(c: &mut Criterion) {
    let options = esmify::Options::default();
    c.bench_function("convert_dependency_list_module", |b| {
        b.iter(|| esmify::convert(black_box(WIDGET), &options).unwrap())
    });
    c.bench_function("convert_commonjs_wrapper_module", |b| {
        b.iter(|| esmify::convert(black_box(WRAPPER), &options).unwrap())
    });
}

criterion_group!(benches, convert_benchmark);
criterion_main!(benches);
